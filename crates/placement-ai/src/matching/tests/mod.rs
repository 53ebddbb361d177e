mod common;

mod allocation;
