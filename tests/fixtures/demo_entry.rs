//! Entry library loaded by the bootstrap integration tests
//!
//! Built as a cdylib at test time. `demo::main` writes its argv, joined by
//! spaces, to the file named by `RTDEP_DEMO_OUT` and exits with status 3 when
//! one of its arguments is `fail`.

#![allow(non_snake_case)]

use std::ffi::{CStr, c_char, c_int};

#[no_mangle]
pub extern "C" fn demo__main(argc: c_int, argv: *const *const c_char) -> c_int {
    let args: Vec<String> = (0..argc as usize)
        .map(|i| {
            // SAFETY: the caller passes `argc` valid C strings in `argv`.
            unsafe { CStr::from_ptr(*argv.add(i)) }
                .to_string_lossy()
                .into_owned()
        })
        .collect();

    if let Ok(out) = std::env::var("RTDEP_DEMO_OUT") {
        if std::fs::write(out, args.join(" ")).is_err() {
            return 2;
        }
    }

    if args.iter().skip(1).any(|arg| arg == "fail") {
        3
    } else {
        0
    }
}
