//! plotscript: build gnuplot scripts from typed forms, then run gnuplot on them.
//!
//! Forms are rendered to fragments, assembled into one script in caller order,
//! and either returned (dry run) or piped to the interpreter on stdin.
//!
//! ```no_run
//! use plotscript::core::executor;
//! use plotscript::core::types::{Form, RunOptions, Value};
//! use plotscript::transport::LocalTransport;
//!
//! let forms = vec![
//!     Form::Set { name: "terminal".into(), values: vec![Value::word("pngcairo")] },
//!     Form::Set { name: "output".into(), values: vec![Value::text("sine.png")] },
//!     Form::Raw("plot sin(x)".into()),
//! ];
//! let path = executor::execute(&forms, &RunOptions::default(), &LocalTransport::default())?;
//! assert_eq!(path, "sine.png");
//! # Ok::<(), plotscript::core::types::PlotError>(())
//! ```

pub mod cli;
pub mod core;
pub mod forms;
pub mod transport;
