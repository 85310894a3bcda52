//! Section numerals, subsection suffixes and the global finding counter.

const ROMAN_TABLE: [(u32, &str); 13] = [
    (1000, "M"),
    (900, "CM"),
    (500, "D"),
    (400, "CD"),
    (100, "C"),
    (90, "XC"),
    (50, "L"),
    (40, "XL"),
    (10, "X"),
    (9, "IX"),
    (5, "V"),
    (4, "IV"),
    (1, "I"),
];

/// Subtractive Roman numeral. Zero yields an empty string.
pub fn to_roman(mut n: u32) -> String {
    let mut out = String::new();
    for &(value, symbol) in ROMAN_TABLE.iter() {
        while n >= value {
            out.push_str(symbol);
            n -= value;
        }
    }
    out
}

/// Alphabetic label for a zero-based position: A..Z, then AA, AB, ...
pub fn alpha_label(index: usize) -> String {
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.iter().rev().map(|&b| b as char).collect()
}

/// `I – Facade`
pub fn section_label(numeral: &str, title: &str) -> String {
    format!("{} – {}", numeral, title)
}

/// `I.A – Roof`
pub fn subsection_label(numeral: &str, index: usize, title: &str) -> String {
    format!("{}.{} – {}", numeral, alpha_label(index), title)
}

/// The single finding counter of one generation call.
#[derive(Debug, Clone)]
pub struct FindingCounter {
    next: u32,
}

impl Default for FindingCounter {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl FindingCounter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current number, then advances.
    pub fn next_number(&mut self) -> u32 {
        let current = self.next;
        self.next += 1;
        current
    }

    /// How many numbers have been handed out.
    pub fn issued(&self) -> u32 {
        self.next - 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roman_numerals() {
        assert_eq!(to_roman(1), "I");
        assert_eq!(to_roman(4), "IV");
        assert_eq!(to_roman(9), "IX");
        assert_eq!(to_roman(14), "XIV");
        assert_eq!(to_roman(49), "XLIX");
        assert_eq!(to_roman(2024), "MMXXIV");
        assert_eq!(to_roman(3999), "MMMCMXCIX");
        assert_eq!(to_roman(0), "");
    }

    #[test]
    fn alpha_labels_continue_past_z() {
        assert_eq!(alpha_label(0), "A");
        assert_eq!(alpha_label(2), "C");
        assert_eq!(alpha_label(25), "Z");
        assert_eq!(alpha_label(26), "AA");
        assert_eq!(alpha_label(27), "AB");
        assert_eq!(alpha_label(701), "ZZ");
        assert_eq!(alpha_label(702), "AAA");
    }

    #[test]
    fn labels() {
        assert_eq!(section_label("III", "Garage"), "III – Garage");
        assert_eq!(subsection_label("II", 1, "Pumps"), "II.B – Pumps");
    }

    #[test]
    fn counter_is_contiguous_from_one() {
        let mut counter = FindingCounter::new();
        let numbers: Vec<u32> = (0..4).map(|_| counter.next_number()).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4]);
        assert_eq!(counter.issued(), 4);
    }
}
