pub mod logbuf;
pub mod token_counter;
