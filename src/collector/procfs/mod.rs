//! Collectors for the Linux `/proc` and `/sys` filesystems.
//!
//! This module provides parsers and collectors for reading memory, CPU and
//! process information from the kernel's virtual filesystems.

pub mod cpu;
pub mod error;
pub mod memory;
pub mod parser;
pub mod process;
pub mod reader;

pub use cpu::CpuCollector;
pub use error::CollectError;
pub use memory::MemoryCollector;
pub use parser::{ParseError, TextRecords, field_value};
pub use process::ProcessCollector;
pub use reader::read_records;
