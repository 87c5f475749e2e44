pub(crate) mod support;

mod emitted_code;
mod fixtures;
