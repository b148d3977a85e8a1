mod lesson;
pub use lesson::*;
