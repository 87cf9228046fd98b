// This file is the module declaration file for the `builders` module.
// It declares and makes public all the sub-modules within the `src/builders`
// directory. These modules hold the selector construction logic and the
// tooling that works on selector sheets.

// `facade` module:
// One entry point per selector part type plus `combine`. Each call starts a
// fresh `SelectorBuilder`, so separate chains never share state.
pub mod facade;

// `importer` module:
// Reads selector definitions from external files (the INI-like custom
// format, JSON, YAML or TOML) so they can be merged into a sheet.
pub mod importer;

// `parts` module:
// The fundamental data types: `PartKind`, the six ordered selector
// categories, and `SelectorPart`, one `kind:value` fragment.
pub mod parts;

// `reporter` module:
// Defines the `SheetReporter` trait and the `ConsoleReporter` used by the
// `list` command.
pub mod reporter;

// `selector` module:
// The `SelectorBuilder` itself and the `Combinator` tokens. This is where
// part ordering and cardinality are enforced.
pub mod selector;

// `validator` module:
// Defines the `SheetValidator` trait and the `StandardValidator`, which
// checks a sheet for selectors that cannot be rendered or look mistaken.
pub mod validator;
