// Domain types shared between handlers, generation and the draft store.

pub mod chat;
pub mod form;
