pub mod encoding;
pub mod io;
