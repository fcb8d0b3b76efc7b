pub mod admin;
pub mod contact;
pub mod content;
pub mod fields;
pub mod project;
pub mod skill;
pub mod social;
pub mod timeline;
