use ratatui::style::Color;

pub const PRIMARY: Color = Color::from_u32(0x006366f1);
pub const SECONDARY: Color = Color::from_u32(0x004338ca);
pub const NEUTRAL: Color = Color::from_u32(0x00334155);
pub const MUTED: Color = Color::from_u32(0x0094a3b8);
pub const TEXT: Color = Color::from_u32(0x00e2e8f0);
pub const BACKGROUND: Color = Color::from_u32(0x000f172a);
pub const ACCENT: Color = Color::from_u32(0x00a5b4fc);
pub const SUCCESS: Color = Color::from_u32(0x0034d399);
pub const ERROR: Color = Color::from_u32(0x00f87171);
