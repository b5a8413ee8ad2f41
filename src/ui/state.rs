/// Which input owns the keyboard on the input screens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Focus {
    #[default]
    RoomUpload,
    Dimensions,
    FurnitureUpload,
    Instruction,
}

impl Focus {
    const ORDER: [Focus; 4] = [
        Focus::RoomUpload,
        Focus::Dimensions,
        Focus::FurnitureUpload,
        Focus::Instruction,
    ];

    fn position(self) -> usize {
        Self::ORDER.iter().position(|f| *f == self).unwrap_or(0)
    }

    pub fn next(self) -> Self {
        Self::ORDER[(self.position() + 1) % Self::ORDER.len()]
    }

    pub fn prev(self) -> Self {
        Self::ORDER[(self.position() + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

#[derive(Debug, Clone, Default)]
pub struct UiState {
    pub focus: Focus,
    pub should_quit: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_cycles_both_ways() {
        let mut focus = Focus::default();
        for _ in 0..4 {
            focus = focus.next();
        }
        assert_eq!(focus, Focus::RoomUpload);

        assert_eq!(Focus::RoomUpload.prev(), Focus::Instruction);
        assert_eq!(Focus::Instruction.next(), Focus::RoomUpload);
        assert_eq!(Focus::Dimensions.next(), Focus::FurnitureUpload);
    }
}
