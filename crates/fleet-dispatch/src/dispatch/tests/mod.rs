mod common;
mod cost;
mod locks;
