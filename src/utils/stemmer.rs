//! Porter stemmer.
//!
//! The documentation search widget stems query words with the classic Porter
//! algorithm before looking them up, and the indexer stems page text the same
//! way. Queries must be stemmed identically or nothing matches.
//!
//! ```
//! use docdex::utils::PorterStemmer;
//!
//! let stemmer = PorterStemmer::new();
//! assert_eq!(stemmer.stem("rotation"), "rotat");
//! assert_eq!(stemmer.stem("modules"), "modul");
//! ```

/// Step 2 rewrites, applied when the stem has measure > 0
const STEP2_RULES: &[(&str, &str)] = &[
    ("ational", "ate"),
    ("tional", "tion"),
    ("enci", "ence"),
    ("anci", "ance"),
    ("izer", "ize"),
    ("bli", "ble"),
    ("alli", "al"),
    ("entli", "ent"),
    ("eli", "e"),
    ("ousli", "ous"),
    ("ization", "ize"),
    ("ation", "ate"),
    ("ator", "ate"),
    ("alism", "al"),
    ("iveness", "ive"),
    ("fulness", "ful"),
    ("ousness", "ous"),
    ("aliti", "al"),
    ("iviti", "ive"),
    ("biliti", "ble"),
    ("logi", "log"),
];

/// Step 3 rewrites, applied when the stem has measure > 0
const STEP3_RULES: &[(&str, &str)] = &[
    ("icate", "ic"),
    ("ative", ""),
    ("alize", "al"),
    ("iciti", "ic"),
    ("ical", "ic"),
    ("ful", ""),
    ("ness", ""),
];

/// Step 4 suffixes, removed when the stem has measure > 1
const STEP4_SUFFIXES: &[&str] = &[
    "al", "ance", "ence", "er", "ic", "able", "ible", "ant", "ement", "ment", "ent", "ion", "ou",
    "ism", "ate", "iti", "ous", "ive", "ize",
];

/// Stateless Porter stemmer for lowercase English words
#[derive(Debug, Clone, Copy, Default)]
pub struct PorterStemmer;

impl PorterStemmer {
    pub fn new() -> Self {
        Self
    }

    /// Stem a word. Words shorter than 3 bytes and non-ASCII words are only
    /// lowercased.
    pub fn stem(&self, word: &str) -> String {
        let lower = word.to_lowercase();
        if lower.len() < 3 || !lower.is_ascii() {
            return lower;
        }

        let mut w = Word::new(lower.into_bytes());
        w.step1ab();
        w.step1c();
        w.step2();
        w.step3();
        w.step4();
        w.step5();
        w.finish()
    }
}

/// Word being stemmed. `k` is the logical length; `j` the stem length set by
/// the last successful `ends` call.
struct Word {
    b: Vec<u8>,
    k: usize,
    j: usize,
}

impl Word {
    fn new(b: Vec<u8>) -> Self {
        let k = b.len();
        Self { b, k, j: 0 }
    }

    fn finish(mut self) -> String {
        self.b.truncate(self.k);
        // Only ASCII bytes are ever written
        String::from_utf8(self.b).unwrap_or_default()
    }

    fn is_consonant(&self, i: usize) -> bool {
        match self.b[i] {
            b'a' | b'e' | b'i' | b'o' | b'u' => false,
            b'y' => i == 0 || !self.is_consonant(i - 1),
            _ => true,
        }
    }

    /// Number of vowel-consonant sequences in `b[..j]`
    fn measure(&self) -> usize {
        let mut n = 0;
        let mut i = 0;

        while i < self.j && self.is_consonant(i) {
            i += 1;
        }
        loop {
            while i < self.j && !self.is_consonant(i) {
                i += 1;
            }
            if i >= self.j {
                return n;
            }
            n += 1;
            while i < self.j && self.is_consonant(i) {
                i += 1;
            }
            if i >= self.j {
                return n;
            }
        }
    }

    fn vowel_in_stem(&self) -> bool {
        (0..self.j).any(|i| !self.is_consonant(i))
    }

    fn double_consonant(&self, i: usize) -> bool {
        i >= 1 && self.b[i] == self.b[i - 1] && self.is_consonant(i)
    }

    /// consonant-vowel-consonant ending at `i`, last not w, x or y
    fn cvc(&self, i: usize) -> bool {
        i >= 2
            && self.is_consonant(i)
            && !self.is_consonant(i - 1)
            && self.is_consonant(i - 2)
            && !matches!(self.b[i], b'w' | b'x' | b'y')
    }

    fn ends(&mut self, suffix: &str) -> bool {
        let s = suffix.as_bytes();
        if s.len() > self.k || &self.b[self.k - s.len()..self.k] != s {
            return false;
        }
        self.j = self.k - s.len();
        true
    }

    fn set_to(&mut self, s: &str) {
        self.b.truncate(self.j);
        self.b.extend_from_slice(s.as_bytes());
        self.k = self.b.len();
    }

    fn replace_if_measured(&mut self, s: &str) {
        if self.measure() > 0 {
            self.set_to(s);
        }
    }

    fn last(&self) -> u8 {
        self.b[self.k - 1]
    }

    /// Plurals, -ed and -ing
    fn step1ab(&mut self) {
        if self.last() == b's' {
            if self.ends("sses") {
                self.k -= 2;
            } else if self.ends("ies") {
                self.set_to("i");
            } else if self.k >= 2 && self.b[self.k - 2] != b's' {
                self.k -= 1;
            }
        }

        if self.ends("eed") {
            if self.measure() > 0 {
                self.k -= 1;
            }
        } else if (self.ends("ed") || self.ends("ing")) && self.vowel_in_stem() {
            self.k = self.j;
            if self.ends("at") {
                self.set_to("ate");
            } else if self.ends("bl") {
                self.set_to("ble");
            } else if self.ends("iz") {
                self.set_to("ize");
            } else if self.double_consonant(self.k - 1) {
                if !matches!(self.last(), b'l' | b's' | b'z') {
                    self.k -= 1;
                }
            } else if self.measure() == 1 && self.cvc(self.k - 1) {
                self.j = self.k;
                self.set_to("e");
            }
        }
    }

    /// Terminal y to i when there is another vowel in the stem
    fn step1c(&mut self) {
        if self.k > 1 && self.ends("y") && self.vowel_in_stem() {
            self.b[self.k - 1] = b'i';
        }
    }

    fn step2(&mut self) {
        if self.k < 2 {
            return;
        }
        for (suffix, replacement) in STEP2_RULES {
            if self.ends(suffix) {
                self.replace_if_measured(replacement);
                return;
            }
        }
    }

    fn step3(&mut self) {
        for (suffix, replacement) in STEP3_RULES {
            if self.ends(suffix) {
                self.replace_if_measured(replacement);
                return;
            }
        }
    }

    fn step4(&mut self) {
        if self.k < 2 {
            return;
        }
        for suffix in STEP4_SUFFIXES {
            if self.ends(suffix) {
                if *suffix == "ion" && !(self.j >= 1 && matches!(self.b[self.j - 1], b's' | b't'))
                {
                    return;
                }
                if self.measure() > 1 {
                    self.k = self.j;
                }
                return;
            }
        }
    }

    /// Final -e and double -ll
    fn step5(&mut self) {
        self.j = self.k;
        if self.last() == b'e' {
            let m = self.measure();
            if m > 1 || (m == 1 && !self.cvc(self.k - 2)) {
                self.k -= 1;
            }
        }
        if self.last() == b'l' && self.double_consonant(self.k - 1) && self.measure() > 1 {
            self.k -= 1;
        }
    }
}
