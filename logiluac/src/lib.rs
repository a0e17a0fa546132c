extern crate logilua;
use logilua::*;

use std::collections::BTreeMap;
use std::os::raw::*;
use std::ffi::{CStr, CString};

// C strings can't hold NUL, so drop any that made it into a script or message
fn to_cstring(s: &str) -> CString {
    CString::new(s.replace('\0', "")).unwrap_or_default()
}

unsafe fn from_cstr(s: *const c_char) -> String {
    CStr::from_ptr(s).to_string_lossy().into_owned()
}


/// Compiler handle for C.
///
/// Defines are collected here and handed to the compiler when compiling.
pub struct LogicCompilerC {
    compiler: Compiler<'static>,
    defines: BTreeMap<String, String>
}

/// Compiled logic handle for C. Keeps the C strings pointed to by the getters alive.
pub struct CompiledLogicC {
    logic: CompiledLogic,
    source: CString,
    lines: Vec<CString>,
    diagnostics: Vec<CompileErrorStrings>
}

impl CompiledLogicC {
    fn new(logic: CompiledLogic) -> Self {
        Self {
            source: to_cstring(&logic.to_lua_source()),
            lines: logic.get_lines().iter().map(|l| to_cstring(l)).collect(),
            diagnostics: logic.get_diagnostics().iter().map(CompileErrorStrings::new).collect(),
            logic: logic
        }
    }
}

/// Owned copies of the strings of a [`CompileError`].
pub struct CompileErrorStrings {
    error: CompileError,
    file: CString,
    message: CString
}

impl CompileErrorStrings {
    fn new(error: &CompileError) -> Self {
        Self {
            file: to_cstring(error.get_file()),
            message: to_cstring(error.get_message()),
            error: error.clone()
        }
    }
}


/// Compile error C struct.
#[derive(Copy, Clone)]
#[repr(C)]
pub struct CompileErrorC {
    /// Pointer to a null terminated string containing the file name.
    pub file: *const c_char,

    /// Pointer to a null terminated string containing the message.
    pub message: *const c_char,

    /// Line the error occured on.
    pub line: usize,

    /// Column the error occured on.
    pub column: usize,

    /// Kind of error
    pub error_type: CompileErrorType,

    /// Reserved
    pub base: *mut CompileErrorStrings
}

impl CompileErrorC {
    fn new_owned(error: CompileError) -> Self {
        let reserved_box = Box::new(CompileErrorStrings::new(&error));
        let mut e = Self::new(&reserved_box);
        e.base = Box::into_raw(reserved_box);
        e
    }

    fn new(strings: &CompileErrorStrings) -> Self {
        let (line, column) = strings.error.get_position();

        Self {
            file: strings.file.as_ptr(),
            message: strings.message.as_ptr(),
            line: line,
            column: column,
            error_type: strings.error.get_error_type(),
            base: std::ptr::null_mut()
        }
    }

    unsafe fn free(&mut self) {
        if !self.base.is_null() {
            drop(Box::from_raw(self.base));
            self.base = std::ptr::null_mut();
            self.file = std::ptr::null();
            self.message = std::ptr::null();
            self.line = 0;
            self.column = 0;
        }
    }
}


/// Allocate a compiler instance using the built-in command catalog and return a pointer to it.
///
/// # Requirements
///
/// The resulting pointer must be freed with [`logilua_compiler_free`] or else a memory leak will occur.
#[no_mangle]
pub extern "C" fn logilua_compiler_new() -> *mut LogicCompilerC {
    Box::into_raw(Box::new(LogicCompilerC { compiler: Compiler::new(Catalog::builtin()), defines: BTreeMap::new() }))
}

/// Free a compiler instance.
///
/// # Requirements
///
/// If any of these requirements are not met, **undefined behavior** will occur:
/// * The `compiler` parameter must point to a valid [`LogicCompilerC`] or be null.
/// * If non-null, make sure the function you got the pointer from states that this function needs to be used to clean it up.
#[no_mangle]
pub unsafe extern "C" fn logilua_compiler_free(compiler: *mut LogicCompilerC) {
    if !compiler.is_null() {
        drop(Box::from_raw(compiler));
    }
}

/// Free an error returned by a function.
///
/// Anything pointed to by the [`CompileErrorC`] struct will no longer be valid.
///
/// # Requirements
///
/// If any of these requirements are not met, **undefined behavior** will occur:
/// * The `CompileErrorC` pointed to must be initialized either as a zeroed-out struct or from a logiluac function.
/// * The function that initialized the `CompileErrorC` must state that this function needs to be used to clean it up.
#[no_mangle]
pub unsafe extern "C" fn logilua_error_free(error: *mut CompileErrorC) {
    (*error).free()
}

/// Add one preprocessed line.
///
/// # Requirements
///
/// If any of these requirements are not met, **undefined behavior** will occur:
/// * `compiler` must point to a valid [`LogicCompilerC`].
/// * `filename` and `text` must be valid, null-terminated strings. Invalid UTF-8 is replaced.
#[no_mangle]
pub unsafe extern "C" fn logilua_compiler_add_line(compiler: *mut LogicCompilerC, filename: *const c_char, line_number: usize, text: *const c_char) {
    (*compiler).compiler.add_line(&from_cstr(filename), line_number, &from_cstr(text))
}

/// Add a define, replacing any existing define with the same name.
///
/// # Requirements
///
/// If any of these requirements are not met, **undefined behavior** will occur:
/// * `compiler` must point to a valid [`LogicCompilerC`].
/// * `name` and `value` must be valid, null-terminated strings. Invalid UTF-8 is replaced.
#[no_mangle]
pub unsafe extern "C" fn logilua_compiler_add_define(compiler: *mut LogicCompilerC, name: *const c_char, value: *const c_char) {
    (*compiler).defines.insert(from_cstr(name), from_cstr(value));
}

/// Add all lines of the given script.
///
/// Returns zero on success.
///
/// # Errors
///
/// On failure, a nonzero number is returned, and, if `error` is non-null, the pointer pointed to by `error` will be set to the error.
///
/// # Requirements
///
/// If an error is returned, the resulting error must be freed with [`logilua_error_free`] or else a memory leak will occur.
///
/// If any of these requirements are not met, **undefined behavior** will occur:
/// * `input_filename` must be a valid, null-terminated string.
/// * `input_data` must point to a region of size `input_data_length` (it does not need to be null-terminated).
/// * `error` must either be null or point to a writable [`CompileErrorC`].
#[no_mangle]
pub unsafe extern "C" fn logilua_compiler_read_script_data(compiler: *mut LogicCompilerC, input_filename: *const c_char, input_data: *const u8, input_data_length: usize, error: *mut CompileErrorC) -> c_int {
    let compiler_ref = &mut *compiler;
    let filename = from_cstr(input_filename);
    let input_data_slice = std::slice::from_raw_parts(input_data, input_data_length);

    match compiler_ref.compiler.read_script_data(filename.as_str(), input_data_slice) {
        Ok(()) => 0,
        Err(e) => {
            if !error.is_null() {
                *error = CompileErrorC::new_owned(e);
            }
            -1
        }
    }
}

/// Remove all lines added so far. Defines are kept.
///
/// # Requirements
///
/// `compiler` must point to a valid [`LogicCompilerC`] or else **undefined behavior** will occur.
#[no_mangle]
pub unsafe extern "C" fn logilua_compiler_clear(compiler: *mut LogicCompilerC) {
    (*compiler).compiler.clear()
}

/// Compile all added lines.
///
/// This never fails. Errors in the script are available through [`logilua_logic_get_diagnostics`].
///
/// # Requirements
///
/// The resulting pointer must be freed with [`logilua_logic_free`] or else a memory leak will occur.
///
/// `compiler` must point to a valid [`LogicCompilerC`] or else **undefined behavior** will occur.
#[no_mangle]
pub unsafe extern "C" fn logilua_compiler_compile(compiler: *mut LogicCompilerC) -> *mut CompiledLogicC {
    let compiler_ref = &mut *compiler;
    compiler_ref.compiler.set_defines(compiler_ref.defines.clone());
    Box::into_raw(Box::new(CompiledLogicC::new(compiler_ref.compiler.compile())))
}

/// Compile all added lines into a Lua file at `path`.
///
/// # Errors
///
/// On failure to write the file, a null pointer is returned, and, if `error` is non-null, the pointer pointed to by `error` will be set to the error.
///
/// # Requirements
///
/// If the function succeeds, the resulting pointer must be freed with [`logilua_logic_free`] or else a memory leak will occur.
///
/// If an error is returned, the resulting error must be freed with [`logilua_error_free`] or else a memory leak will occur.
///
/// If any of these requirements are not met, **undefined behavior** will occur:
/// * `compiler` must point to a valid [`LogicCompilerC`].
/// * `path` must be a valid, null-terminated string.
/// * `error` must either be null or point to a writable [`CompileErrorC`].
#[no_mangle]
pub unsafe extern "C" fn logilua_compiler_compile_to_file(compiler: *mut LogicCompilerC, path: *const c_char, error: *mut CompileErrorC) -> *mut CompiledLogicC {
    let compiler_ref = &mut *compiler;
    compiler_ref.compiler.set_defines(compiler_ref.defines.clone());

    match compiler_ref.compiler.compile_to_file(from_cstr(path)) {
        Ok(n) => Box::into_raw(Box::new(CompiledLogicC::new(n))),
        Err(e) => {
            if !error.is_null() {
                *error = CompileErrorC::new_owned(e);
            }
            std::ptr::null_mut()
        }
    }
}

/// Free compiled logic.
///
/// # Requirements
///
/// If any of these requirements are not met, **undefined behavior** will occur:
/// * The `logic` parameter must point to a valid [`CompiledLogicC`] or be null.
/// * If non-null, make sure the function you got the pointer from states that this function needs to be used to clean it up.
#[no_mangle]
pub unsafe extern "C" fn logilua_logic_free(logic: *mut CompiledLogicC) {
    if !logic.is_null() {
        drop(Box::from_raw(logic));
    }
}

/// Return 0 if the logic compiled without errors, or 1 otherwise.
///
/// `logic` must point to a valid [`CompiledLogicC`] or else **undefined behavior** will occur.
#[no_mangle]
pub unsafe extern "C" fn logilua_logic_get_status(logic: *const CompiledLogicC) -> c_int {
    (*logic).logic.status()
}

/// Get the whole generated Lua program as a null-terminated string.
///
/// The string is owned by the [`CompiledLogicC`] and is no longer valid after [`logilua_logic_free`] is called.
///
/// `logic` must point to a valid [`CompiledLogicC`] or else **undefined behavior** will occur.
#[no_mangle]
pub unsafe extern "C" fn logilua_logic_get_source(logic: *const CompiledLogicC) -> *const c_char {
    (*logic).source.as_ptr()
}

/// Get all generated lines.
///
/// Return the number of lines. Write this many string pointers to an array pointed to by `lines` if `lines` is non-null.
///
/// # Requirements
///
/// If any of these requirements are not met, **undefined behavior** will occur:
/// * The `logic` parameter must point to a valid [`CompiledLogicC`].
/// * The `lines` parameter must point to an array long enough to hold the result of this function or be null. To query the number of lines, run this function with this parameter set to null.
/// * If [`logilua_logic_free`] is called, the resulting lines will no longer be valid.
#[no_mangle]
pub unsafe extern "C" fn logilua_logic_get_lines(logic: *const CompiledLogicC, lines: *mut *const c_char) -> usize {
    let all_lines = &(*logic).lines;
    let count = all_lines.len();

    if !lines.is_null() {
        for i in 0..count {
            *lines.add(i) = all_lines[i].as_ptr();
        }
    }

    count
}

/// Get all errors reported while compiling.
///
/// Return the number of errors. Write this many errors to an array pointed to by `diagnostics` if `diagnostics` is non-null.
///
/// These errors must NOT be freed with [`logilua_error_free`], as the resources are owned by the [`CompiledLogicC`], not the [`CompileErrorC`] struct.
///
/// # Requirements
///
/// If any of these requirements are not met, **undefined behavior** will occur:
/// * The `logic` parameter must point to a valid [`CompiledLogicC`].
/// * The `diagnostics` parameter must point to a valid array of [`CompileErrorC`] long enough to hold the result of this function or be null. To query the number of errors, run this function with this parameter set to null.
/// * If [`logilua_logic_free`] is called, the resulting errors will no longer be valid.
#[no_mangle]
pub unsafe extern "C" fn logilua_logic_get_diagnostics(logic: *const CompiledLogicC, diagnostics: *mut CompileErrorC) -> usize {
    let all_diagnostics = &(*logic).diagnostics;
    let count = all_diagnostics.len();

    if !diagnostics.is_null() {
        for i in 0..count {
            *diagnostics.add(i) = CompileErrorC::new(&all_diagnostics[i])
        }
    }

    count
}
