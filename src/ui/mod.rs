pub mod builtin_themes;
pub mod chat_loop;
pub mod renderer;
pub mod theme;
