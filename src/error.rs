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

extern crate error_chain;
extern crate serde_json;
extern crate serde_yaml;

use std::sync::PoisonError;

error_chain! {
    types {
        Error, ErrorKind, ResultExt, Result;
    }
    errors {
        Poisoned {
            description("a thread holding the locked panicked and poisoned the lock")
        }

        IllegalState(desc: String) {
            description(desc)
            display("Illegal state: {}", desc)
        }

        IllegalArgument(desc: String) {
            description(desc)
            display("Illegal argument: {}", desc)
        }

        EngineInitializationFailed(errmsg: String) {
            description(errmsg)
            display("Engine initialization failed: {}", errmsg)
        }

        EngineUnavailable(errmsg: String) {
            description(errmsg)
            display("Engine unavailable: {}", errmsg)
        }

        MalformedSegmentationOutput(errmsg: String) {
            description(errmsg)
            display("Malformed segmentation output: {}", errmsg)
        }

        UserDictionaryImportFailed(errmsg: String) {
            description(errmsg)
            display("User dictionary import failed: {}", errmsg)
        }
    }

    foreign_links {
        IoError(::std::io::Error);
        FromUtf8Err(::std::string::FromUtf8Error);
        SerdeJsonError(self::serde_json::Error);
        SerdeYamlError(self::serde_yaml::Error);
    }
}

impl<Guard> From<PoisonError<Guard>> for Error {
    fn from(_: PoisonError<Guard>) -> Error {
        ErrorKind::Poisoned.into()
    }
}
