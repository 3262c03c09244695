#![cfg(doctest)]

use doc_comment::doc_comment;

doc_comment!(
    include_str!("../crates/rye-abstractions/README.md"),
    pub mod readme {}
);
