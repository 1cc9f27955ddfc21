// Library root
// -----------
// The binary (`main.rs`) wires these modules into the interactive tool.
//
// Module responsibilities:
// - `catalog`: the book records, their JSON file and the store
//   operations (add, remove, search, status changes).
// - `error`: the store's error type.
// - `shell`: the numbered menu loop and its input sources.
//
// The shell only talks to `Catalog`, so the store can be tested on its
// own against a temporary file.
pub mod catalog;
pub mod error;
pub mod shell;
