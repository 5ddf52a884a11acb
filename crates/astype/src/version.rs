// HostVersion — Release numbers of the host tensor library
//
// Accepted forms, all with exactly three numeric components:
//
//   1.3.0              release
//   1.3.0a0, 1.3.0b1   alpha / beta, label glued to the patch number
//   1.3.0-rc1          release candidate, separator allowed
//   1.3.0.post1        post-release, also 1.3.0-1
//   1.3.0.dev20190801  nightly
//   1.13.1+cu117       build metadata after '+' is ignored
//
// Segments may be combined in the order pre, post, dev (1.3.0rc1.post2.dev3).
// Ordering for one release number:
//
//   dev < a < b < rc < release < post
//
// so a 1.3.0 nightly does not unlock features that shipped in 1.3.0, while a
// 1.3.0 post-release does.

use std::cmp::Ordering;
use std::fmt;

/// Pre-release phase and number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PreRelease {
    Alpha(u64),
    Beta(u64),
    Rc(u64),
}

/// A parsed `MAJOR.MINOR.PATCH[pre][.postN][.devN]` host version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HostVersion {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
    pub pre: Option<PreRelease>,
    pub post: Option<u64>,
    pub dev: Option<u64>,
}

/// First host release with the Bool and BF16 dtypes.
pub const FEATURE_THRESHOLD: HostVersion = HostVersion::new(1, 3, 0);

#[derive(Clone, Copy)]
enum Label {
    Alpha,
    Beta,
    Rc,
    Post,
    Dev,
}

// Longer spellings first: "preview" before "pre", "rc" and "rev" before "r".
const LABELS: &[(&str, Label)] = &[
    ("alpha", Label::Alpha),
    ("a", Label::Alpha),
    ("beta", Label::Beta),
    ("b", Label::Beta),
    ("preview", Label::Rc),
    ("pre", Label::Rc),
    ("rc", Label::Rc),
    ("c", Label::Rc),
    ("post", Label::Post),
    ("rev", Label::Post),
    ("r", Label::Post),
    ("dev", Label::Dev),
];

impl HostVersion {
    pub const fn new(major: u64, minor: u64, patch: u64) -> Self {
        HostVersion {
            major,
            minor,
            patch,
            pre: None,
            post: None,
            dev: None,
        }
    }

    /// Parse a version string. Returns `None` for anything that does not
    /// have three numeric components followed by recognised segments.
    pub fn parse(s: &str) -> Option<Self> {
        let s = s.trim();
        let s = s.split_once('+').map_or(s, |(head, _)| head);

        let mut parts = s.splitn(3, '.');
        let major = parse_number(parts.next()?)?;
        let minor = parse_number(parts.next()?)?;
        let rest = parts.next()?;

        let digits = count_digits(rest);
        let patch = parse_number(&rest[..digits])?;

        let mut version = HostVersion::new(major, minor, patch);
        version.parse_segments(&rest[digits..].to_ascii_lowercase())?;
        Some(version)
    }

    fn parse_segments(&mut self, mut s: &str) -> Option<()> {
        // 0 = nothing yet, then 1 = pre, 2 = post, 3 = dev.
        let mut stage = 0;
        while !s.is_empty() {
            let implicit_post =
                s.starts_with('-') && s[1..].starts_with(|c: char| c.is_ascii_digit());
            s = s.trim_start_matches(&['-', '_', '.'][..]);

            let (label, rest) = if implicit_post {
                (Label::Post, s)
            } else {
                LABELS
                    .iter()
                    .find(|(name, _)| s.starts_with(*name))
                    .map(|(name, label)| (*label, &s[name.len()..]))?
            };

            let digits = count_digits(rest);
            let n: u64 = if digits == 0 {
                0
            } else {
                rest[..digits].parse().ok()?
            };
            s = &rest[digits..];

            let next = match label {
                Label::Alpha | Label::Beta | Label::Rc => 1,
                Label::Post => 2,
                Label::Dev => 3,
            };
            if next <= stage {
                return None;
            }
            stage = next;

            match label {
                Label::Alpha => self.pre = Some(PreRelease::Alpha(n)),
                Label::Beta => self.pre = Some(PreRelease::Beta(n)),
                Label::Rc => self.pre = Some(PreRelease::Rc(n)),
                Label::Post => self.post = Some(n),
                Label::Dev => self.dev = Some(n),
            }
        }
        Some(())
    }

    /// Whether this version is at or above `min`.
    pub fn at_least(&self, min: &HostVersion) -> bool {
        self >= min
    }

    fn sort_key(&self) -> (u64, u64, u64, Rank<PreRelease>, Rank<u64>, Rank<u64>) {
        // A bare dev release sorts before every pre-release of its number.
        let pre = match (self.pre, self.post, self.dev) {
            (Some(pre), _, _) => Rank::At(pre),
            (None, None, Some(_)) => Rank::Below,
            _ => Rank::Above,
        };
        let post = self.post.map_or(Rank::Below, Rank::At);
        let dev = self.dev.map_or(Rank::Above, Rank::At);
        (self.major, self.minor, self.patch, pre, post, dev)
    }
}

#[derive(PartialEq, Eq, PartialOrd, Ord)]
enum Rank<T> {
    Below,
    At(T),
    Above,
}

fn count_digits(s: &str) -> usize {
    s.bytes().take_while(u8::is_ascii_digit).count()
}

fn parse_number(s: &str) -> Option<u64> {
    if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    s.parse().ok()
}

impl Ord for HostVersion {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl PartialOrd for HostVersion {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl fmt::Display for HostVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        match self.pre {
            Some(PreRelease::Alpha(n)) => write!(f, "a{n}")?,
            Some(PreRelease::Beta(n)) => write!(f, "b{n}")?,
            Some(PreRelease::Rc(n)) => write!(f, "rc{n}")?,
            None => {}
        }
        if let Some(n) = self.post {
            write!(f, ".post{n}")?;
        }
        if let Some(n) = self.dev {
            write!(f, ".dev{n}")?;
        }
        Ok(())
    }
}
