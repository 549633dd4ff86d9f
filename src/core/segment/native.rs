// Copyright 2019 Zhizhesihai (Beijing) Technology Limited.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// See the License for the specific language governing permissions and
// limitations under the License.

//! Binding to the NLPIR/ICTCLAS shared library.

use core::segment::{EngineSettings, SegmentEngine};
use error::{ErrorKind, Result};

use std::ffi::{CStr, CString};
use std::os::raw::{c_char, c_int, c_uint};
use std::path::Path;
use std::sync::Mutex;

const UTF8_CODE: c_int = 1;

#[link(name = "NLPIR")]
extern "C" {
    fn NLPIR_Init(data_path: *const c_char, encoding: c_int, licence_code: *const c_char) -> c_int;
    fn NLPIR_ImportUserDict(file_name: *const c_char, overwrite: bool) -> c_uint;
    fn NLPIR_Tokenizer4IR(text: *const c_char, fine_segment: bool) -> *const c_char;
    fn NLPIR_GetLastErrorMsg() -> *const c_char;
    fn NLPIR_Exit() -> bool;
}

lazy_static! {
    // the library keeps one global state, setup and teardown must not interleave
    static ref NATIVE_LOCK: Mutex<()> = Mutex::new(());
}

fn c_string(value: &str) -> Result<CString> {
    CString::new(value).map_err(|e| ErrorKind::IllegalArgument(e.to_string()).into())
}

fn path_string(path: &Path) -> Result<CString> {
    match path.to_str() {
        Some(p) => c_string(p),
        None => {
            bail!(ErrorKind::IllegalArgument(format!(
                "path is not valid UTF-8: {}",
                path.display()
            )))
        }
    }
}

unsafe fn owned_string(ptr: *const c_char) -> Option<String> {
    if ptr.is_null() {
        None
    } else {
        Some(CStr::from_ptr(ptr).to_string_lossy().into_owned())
    }
}

fn last_error_msg() -> String {
    unsafe { owned_string(NLPIR_GetLastErrorMsg()) }.unwrap_or_else(|| "unknown error".into())
}

/// The native NLPIR engine. There is a single library state per process,
/// share one `EngineHandle` over it.
#[derive(Debug, Default)]
pub struct NlpirEngine;

impl NlpirEngine {
    pub fn new() -> NlpirEngine {
        NlpirEngine
    }

    /// Releases the library state, the engine must not be used afterwards.
    pub fn exit(&self) -> bool {
        let _guard = NATIVE_LOCK.lock();
        unsafe { NLPIR_Exit() }
    }
}

impl SegmentEngine for NlpirEngine {
    fn init(&self, settings: &EngineSettings) -> Result<()> {
        let data_path = path_string(&settings.data_path)?;
        let license = c_string(&settings.license_code)?;

        let _guard = NATIVE_LOCK.lock()?;
        let ok = unsafe { NLPIR_Init(data_path.as_ptr(), UTF8_CODE, license.as_ptr()) };
        if ok == 0 {
            bail!(ErrorKind::EngineInitializationFailed(last_error_msg()));
        }
        Ok(())
    }

    fn import_user_dict(&self, path: &Path, overwrite: bool) -> Result<usize> {
        let file_name = path_string(path)?;

        let _guard = NATIVE_LOCK.lock()?;
        let count = unsafe { NLPIR_ImportUserDict(file_name.as_ptr(), overwrite) };
        if count == 0 {
            bail!(ErrorKind::UserDictionaryImportFailed(last_error_msg()));
        }
        Ok(count as usize)
    }

    fn tokenize_for_ir(&self, text: &str, fine_grained: bool) -> Result<String> {
        let line = c_string(text)?;
        let output = unsafe { owned_string(NLPIR_Tokenizer4IR(line.as_ptr(), fine_grained)) };
        match output {
            Some(payload) => Ok(payload),
            None => {
                bail!(ErrorKind::EngineUnavailable(last_error_msg()))
            }
        }
    }
}
