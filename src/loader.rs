/// Frames for the spinner shown inside a tile while its image loads.
const BRAILLE_FRAMES: &[&str] = &["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"];

pub(crate) const TICK_MS: u64 = 80;

#[derive(Debug, Clone, Default)]
pub(crate) struct Spinner {
    frame: usize,
}

impl Spinner {
    pub(crate) fn tick(&mut self) {
        self.frame = (self.frame + 1) % BRAILLE_FRAMES.len();
    }

    pub(crate) fn glyph(&self) -> &'static str {
        BRAILLE_FRAMES[self.frame % BRAILLE_FRAMES.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spinner_wraps_around() {
        let mut spinner = Spinner::default();
        let first = spinner.glyph();
        for _ in 0..BRAILLE_FRAMES.len() {
            spinner.tick();
        }
        assert_eq!(spinner.glyph(), first);
    }

    #[test]
    fn spinner_advances() {
        let mut spinner = Spinner::default();
        spinner.tick();
        assert_eq!(spinner.glyph(), "⠙");
    }
}
