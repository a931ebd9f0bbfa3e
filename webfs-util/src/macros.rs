// Copyright 2025 OPPO.
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

// Create an error message carrying the thread name and the source location.
#[macro_export]
macro_rules! err_msg {
    ($e:expr) => ({
        let thread = $crate::runtime::thread_name();
        format!("[{}] ERROR: {}({}:{})", thread, $e, file!(), line!())
    });

    ($f:tt, $($arg:expr),+) => ({
        let thread = $crate::runtime::thread_name();
        format!("[{}] ERROR: {}({}:{})", thread, format!($f, $($arg),+), file!(), line!())
    });
}

// Convert into the caller's error type, keeping the location of the failure.
// 1. String error: err_box!("{}", "error")
// 2. Error error: err_box!(std::error::Error)
#[macro_export]
macro_rules! err_box {
    ($e:expr) => ({
        Err($crate::err_msg!($e).into())
    });

    ($f:tt, $($arg:expr),+) => ({
        $crate::err_box!(format!($f, $($arg),+))
    });
}

// Unified conversion error type.
#[macro_export]
macro_rules! try_err {
    ($expr:expr) => {{
        match $expr {
            Ok(r) => r,
            Err(e) => return $crate::err_box!(e),
        }
    }};
}

/// Equivalent to:
/// match x.as_ref() {
///     None => return err_box!("Uninitialized"),
///     Some(v) => v
/// };
#[macro_export]
macro_rules! try_option {
    ($expr:expr) => {{
        match $expr {
            None => return $crate::err_box!("Uninitialized"),
            Some(res) => res,
        }
    }};

   ($expr:expr, $f:tt, $($arg:expr),+) => ({
        match $expr {
            None => return $crate::err_box!(format!($f, $($arg),+)),
            Some(res) => res,
        }
    });
}

// Match Result, if Err, log and return the default value.
// Used where the caller has no way to report the error.
#[macro_export]
macro_rules! try_log {
    ($expr:expr, $d:expr) => {{
        match $expr {
            Err(e) => {
                log::warn!("{}", $crate::err_msg!(e));
                $d
            }
            Ok(res) => res,
        }
    }};

    // Just record the error log and do nothing else.
    ($expr:expr) => {{
        if let Err(e) = &$expr {
            log::warn!("{}", e);
        }
        $expr
    }};
}

#[macro_export]
macro_rules! ternary {
    ($condition:expr, $true_expr:expr, $false_expr:expr) => {
        if $condition {
            $true_expr
        } else {
            $false_expr
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::CommonResult;
    use std::io::{Error, ErrorKind};

    #[test]
    fn err_box() {
        let err_str: CommonResult<()> = err_box!("not found file: {}", "/d1.log");
        println!("err_str = {:?}", err_str);
        assert!(err_str.is_err());
        let msg = err_str.unwrap_err().to_string();
        assert!(msg.contains("not found file: /d1.log"));
        assert!(msg.contains("macros.rs"));

        let err_box: CommonResult<()> =
            err_box!(Error::new(ErrorKind::ConnectionReset, "connection reset"));
        println!("err_box = {:?}", err_box);
        assert!(err_box.is_err());
    }

    fn parse(s: &str) -> CommonResult<u16> {
        let v = try_err!(s.parse::<u16>());
        Ok(v)
    }

    #[test]
    fn try_err() {
        assert_eq!(parse("755").unwrap(), 755);
        assert!(parse("rwx").is_err());
    }

    #[test]
    fn try_opt() -> CommonResult<()> {
        let mut x = Some("123".to_string());
        let v = try_option!(x.as_mut());
        assert_eq!(v, "123");

        assert!(first_even(&[1, 3]).is_err());
        assert_eq!(first_even(&[1, 4])?, 4);
        Ok(())
    }

    fn first_even(list: &[i32]) -> CommonResult<i32> {
        let v = try_option!(list.iter().find(|x| *x % 2 == 0), "no even in {:?}", list);
        Ok(*v)
    }

    #[test]
    fn try_log_default() {
        let res: Result<u32, String> = Err("bad".to_string());
        let v = try_log!(res, 7);
        assert_eq!(v, 7);
        assert_eq!(ternary!(v > 5, "big", "small"), "big");
    }
}
