// Library root
// -----------
// The binary (`main.rs`) wires these modules into the interactive form.
//
// Module responsibilities:
// - `api`: builds the lookup URL, performs the blocking GET and
//   normalizes the `<br>`-separated response text.
// - `ui`: owns the form state (input field, output area) and the terminal
//   loop that drives the Check / Clear actions.
//
// `ui` depends on `api`, never the other way around, so the lookup logic
// can be tested against a local server without a terminal.
pub mod api;
pub mod ui;
