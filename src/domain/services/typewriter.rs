#[cfg(test)]
#[path = "typewriter_test.rs"]
mod tests;

/// Characters revealed per tick.
pub const REVEAL_CHUNK: usize = 3;

/// Reveals a completed reply in fixed-size character chunks, one chunk per
/// UI tick, to give the "thinking then typing" effect. Holds the index of
/// the transcript message being revealed; the controller guarantees it is
/// the most recently appended bot message and that only one typewriter runs
/// at a time.
pub struct Typewriter {
    target: usize,
    chars: Vec<char>,
    revealed: usize,
}

impl Typewriter {
    pub fn new(target: usize, text: &str) -> Typewriter {
        return Typewriter {
            target,
            chars: text.chars().collect(),
            revealed: 0,
        };
    }

    pub fn target(&self) -> usize {
        return self.target;
    }

    pub fn is_done(&self) -> bool {
        return self.revealed >= self.chars.len();
    }

    /// Advances by one chunk and returns the text revealed so far.
    pub fn tick(&mut self) -> String {
        self.revealed = (self.revealed + REVEAL_CHUNK).min(self.chars.len());
        return self.revealed_text();
    }

    /// Jumps to the end, for interrupts and teardown.
    pub fn finish(&mut self) -> String {
        self.revealed = self.chars.len();
        return self.revealed_text();
    }

    fn revealed_text(&self) -> String {
        return self.chars[..self.revealed].iter().collect();
    }
}
