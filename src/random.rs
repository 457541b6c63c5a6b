//! Random data sources.
//!
//! All randomness of a static generation pass flows through one [`RandomSource`], drawn in
//! schema traversal order, so a fixed seed reproduces the same samples run after run. A host
//! that wants to generate in parallel creates one source per worker instead of sharing one.

use fake::faker::address::en::{CityName, CountryName, PostCode, StateName, StreetName};
use fake::faker::company::en::CompanyName;
use fake::faker::internet::en::{IPv4, SafeEmail, Username};
use fake::faker::job::en::Title as JobTitle;
use fake::faker::lorem::en::{Paragraph, Sentence, Word, Words};
use fake::faker::name::en::{FirstName, LastName, Name};
use fake::faker::phone_number::en::PhoneNumber;
use fake::Fake;
use log::{debug, warn};
use rand::distributions::Alphanumeric;
use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};
use regex_syntax::hir::Hir;
use regex_syntax::ParserBuilder;
use serde_json::Value;
use uuid::Uuid;

use crate::value::GeneratedValue;

/// Seed used when none is configured.
pub const DEFAULT_SEED: u64 = 1;

/// Upper bound for unbounded repetitions (`*`, `+`) when sampling a pattern.
const PATTERN_MAX_REPEAT: u32 = 16;

/// Capability handed to the generator for every random draw.
pub trait RandomSource {
    /// The underlying generator.
    fn rng(&mut self) -> &mut dyn RngCore;

    /// Integer in `min..=max`. A collapsed or inverted range yields `min`.
    fn int_in_range(&mut self, min: i64, max: i64) -> i64 {
        if min >= max {
            return min;
        }
        self.rng().gen_range(min..=max)
    }

    /// Float in `min..=max`. A collapsed, inverted or NaN range yields `min`.
    fn float_in_range(&mut self, min: f64, max: f64) -> f64 {
        if !(min < max) {
            return min;
        }
        if !(max - min).is_finite() {
            // The width overflows f64, so sample the halved range and scale back up.
            let half: f64 = self.rng().gen_range(min / 2.0..=max / 2.0);
            return (half * 2.0).clamp(min, max);
        }
        self.rng().gen_range(min..=max)
    }

    fn boolean(&mut self) -> bool {
        self.rng().gen_bool(0.5)
    }

    /// Index in `0..len`; `len` must be non-zero.
    fn pick_index(&mut self, len: usize) -> usize {
        self.rng().gen_range(0..len)
    }

    /// Alphanumeric string whose length lies in `min_len..=max_len`.
    fn alphanumeric(&mut self, min_len: usize, max_len: usize) -> String {
        let len = self.int_in_range(min_len as i64, max_len as i64).max(0) as usize;
        let rng = self.rng();
        (0..len).map(|_| char::from(rng.sample(Alphanumeric))).collect()
    }

    /// Space-separated words, `min..=max` of them.
    fn words(&mut self, min: usize, max: usize) -> String {
        let words: Vec<String> = Words(min..max.max(min) + 1).fake_with_rng(self.rng());
        words.join(" ")
    }

    fn word(&mut self) -> String {
        Word().fake_with_rng(self.rng())
    }

    /// Version 4 UUID built from the source's bytes.
    fn uuid(&mut self) -> Uuid {
        let mut bytes = [0u8; 16];
        self.rng().fill_bytes(&mut bytes);
        uuid::Builder::from_random_bytes(bytes).into_uuid()
    }

    /// String matching `pattern`, or `None` when the pattern cannot be sampled.
    fn from_pattern(&mut self, pattern: &str) -> Option<String> {
        let hir = match parse_pattern(strip_anchors(pattern)) {
            Ok(hir) => hir,
            Err(e) => {
                warn!("Cannot parse pattern /{}/: {}", pattern, e);
                return None;
            }
        };
        let regex = match rand_regex::Regex::with_hir(hir, PATTERN_MAX_REPEAT) {
            Ok(regex) => regex,
            Err(e) => {
                warn!("Cannot sample pattern /{}/: {}", pattern, e);
                return None;
            }
        };
        let bytes: Vec<u8> = self.rng().sample(&regex);
        String::from_utf8(bytes).ok()
    }
}

/// Parses with Unicode mode off so `\d`, `\w` and `\s` keep their ASCII meaning.
///
/// Patterns that only make sense over Unicode (negated classes, `.`) are parsed again with
/// Unicode mode on.
fn parse_pattern(pattern: &str) -> Result<Hir, regex_syntax::Error> {
    ParserBuilder::new()
        .unicode(false)
        .build()
        .parse(pattern)
        .or_else(|_| ParserBuilder::new().build().parse(pattern))
}

/// `^` and `$` only pin the match; the sample is the whole string either way.
fn strip_anchors(pattern: &str) -> &str {
    let pattern = pattern.strip_prefix('^').unwrap_or(pattern);
    match pattern.strip_suffix('$') {
        Some(rest) if !rest.ends_with('\\') => rest,
        _ => pattern,
    }
}

/// Deterministic source backed by [`StdRng`].
pub struct SeededRandom {
    rng: StdRng,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        debug!("Seeding random source with {}", seed);
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for SeededRandom {
    fn default() -> Self {
        Self::new(DEFAULT_SEED)
    }
}

impl RandomSource for SeededRandom {
    fn rng(&mut self) -> &mut dyn RngCore {
        &mut self.rng
    }
}

/// Resolves a faker `module.function` pair to a concrete value at generation time.
pub trait FakerResolver {
    /// Returns `None` when the pair is unknown.
    fn resolve(
        &self,
        module: &str,
        function: &str,
        options: Option<&Value>,
        random: &mut dyn RandomSource,
    ) -> Option<GeneratedValue>;
}

/// [`FakerResolver`] backed by the `fake` crate, using faker.js module and function names.
#[derive(Debug, Clone, Copy, Default)]
pub struct FakeResolver;

impl FakerResolver for FakeResolver {
    fn resolve(
        &self,
        module: &str,
        function: &str,
        options: Option<&Value>,
        random: &mut dyn RandomSource,
    ) -> Option<GeneratedValue> {
        let text: String = match (module, function) {
            ("person", "fullName") => Name().fake_with_rng(random.rng()),
            ("person", "firstName") => FirstName().fake_with_rng(random.rng()),
            ("person", "lastName") => LastName().fake_with_rng(random.rng()),
            ("person", "jobTitle") => JobTitle().fake_with_rng(random.rng()),
            ("internet", "email") => SafeEmail().fake_with_rng(random.rng()),
            ("internet", "userName") | ("internet", "username") => {
                Username().fake_with_rng(random.rng())
            }
            ("internet", "ipv4") => IPv4().fake_with_rng(random.rng()),
            ("phone", "number") => PhoneNumber().fake_with_rng(random.rng()),
            ("location" | "address", "city") => CityName().fake_with_rng(random.rng()),
            ("location" | "address", "country") => CountryName().fake_with_rng(random.rng()),
            ("location" | "address", "state") => StateName().fake_with_rng(random.rng()),
            ("location" | "address", "street") => StreetName().fake_with_rng(random.rng()),
            ("location" | "address", "zipCode") => PostCode().fake_with_rng(random.rng()),
            ("company", "name") => CompanyName().fake_with_rng(random.rng()),
            ("lorem", "word") | ("word", "noun") | ("word", "adjective") => random.word(),
            ("lorem", "sentence") => Sentence(4..10).fake_with_rng(random.rng()),
            ("lorem", "paragraph") => Paragraph(2..4).fake_with_rng(random.rng()),
            ("word", "words") => random.words(1, 3),
            ("string", "uuid") => random.uuid().to_string(),
            ("string", "alphanumeric") => {
                let (min, max) = length_bounds(options).unwrap_or((10, 10));
                random.alphanumeric(min, max)
            }
            ("number", "int") => {
                let (min, max) = number_bounds(options, 0.0, 1000.0);
                let value = random.int_in_range(min as i64, max as i64);
                return Some(GeneratedValue::Number(value.into()));
            }
            ("number", "float") => {
                let (min, max) = number_bounds(options, 0.0, 1.0);
                let value = random.float_in_range(min, max);
                return serde_json::Number::from_f64(value).map(GeneratedValue::Number);
            }
            ("datatype", "boolean") => return Some(GeneratedValue::Bool(random.boolean())),
            ("helpers", "arrayElement") => {
                let items = options.and_then(Value::as_array).filter(|a| !a.is_empty())?;
                let index = random.pick_index(items.len());
                return Some(GeneratedValue::from(&items[index]));
            }
            _ => return None,
        };
        Some(GeneratedValue::String(text))
    }
}

/// `{ length: n }` or `{ length: { min, max } }`.
fn length_bounds(options: Option<&Value>) -> Option<(usize, usize)> {
    let length = options?.get("length")?;
    if let Some(exact) = length.as_u64() {
        return Some((exact as usize, exact as usize));
    }
    let min = length.get("min")?.as_u64()? as usize;
    let max = length.get("max")?.as_u64()? as usize;
    Some((min, max))
}

fn number_bounds(options: Option<&Value>, default_min: f64, default_max: f64) -> (f64, f64) {
    let get = |key: &str| options.and_then(|o| o.get(key)).and_then(Value::as_f64);
    (
        get("min").unwrap_or(default_min),
        get("max").unwrap_or(default_max),
    )
}
