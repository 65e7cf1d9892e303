//! Lang file model: entries merged from the original and translated files,
//! and the writer that renders them back.
/// Entry records and the merged entry store
mod entry;
/// Lang file rendering
mod writer;

pub use entry::{
    Entry,
    EntryStore,
    LangFileError,
    LangSource,
    parse_entry_line,
};
pub use writer::{
    render_lang_file,
    write_lang_file,
};
