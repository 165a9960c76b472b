//! rstax: an in-memory category hierarchy engine.
//!
//! The core is a forest of named categories ([`taxonomy::Taxonomy`]) with
//! explicit parent assignment, ancestor/descendant queries, a derived
//! subtree height metric kept consistent after every structural edit, and
//! cascading removal. Two independent collaborators live alongside it: a
//! FIFO work-item board ([`tasks::TaskBoard`]) and a multi-index contact
//! directory ([`records::ContactIndex`]). A line-oriented script language
//! ([`script`]) drives the engine from the CLI.

pub mod cli;
pub mod display;
pub mod errors;
pub mod exitcode;
pub mod records;
pub mod script;
pub mod tasks;
pub mod taxonomy;
pub mod util;

pub use errors::{TaskError, TaskResult, TaxonomyError, TaxonomyResult};
pub use records::{Contact, ContactIndex};
pub use tasks::{Task, TaskBoard};
pub use taxonomy::{Category, Taxonomy};
