//! Keyframes and the ordered, immutable keyframe store.

use hashbrown::{HashMap, HashSet};
use serde::{Deserialize, Serialize};

use crate::value::Value;
use crate::AnimatorError;

/// An anchor in time with the parameter values in effect there.
///
/// `values` holds every parameter written for this keyframe or any earlier
/// one (later writes win); `explicit` lists the names written in this
/// keyframe's own block of the script.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Keyframe {
    pub time: f64,
    values: HashMap<String, Value>,
    explicit: HashSet<String>,
}

impl Keyframe {
    /// A keyframe whose values are all explicit.
    pub fn new(time: f64, values: HashMap<String, Value>) -> Self {
        let explicit = values.keys().cloned().collect();
        Self {
            time,
            values,
            explicit,
        }
    }

    pub(crate) fn with_explicit(
        time: f64,
        values: HashMap<String, Value>,
        explicit: HashSet<String>,
    ) -> Self {
        Self {
            time,
            values,
            explicit,
        }
    }

    #[inline]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values.get(name)
    }

    #[inline]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Whether `name` was written in this keyframe's own script block.
    #[inline]
    pub fn is_explicit(&self, name: &str) -> bool {
        self.explicit.contains(name)
    }

    pub fn values(&self) -> &HashMap<String, Value> {
        &self.values
    }

    pub fn param_names(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }
}

/// Indices of the four keyframes surrounding a query time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bracket {
    pub previous: usize,
    pub current: usize,
    pub next: usize,
    pub later: usize,
}

/// Ordered keyframe sequence; never empty.
///
/// Serialized as the plain keyframe list; deserializing goes through
/// [`KeyframeStore::new`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Keyframe>", into = "Vec<Keyframe>")]
pub struct KeyframeStore {
    keyframes: Vec<Keyframe>,
    ordered: bool,
}

impl KeyframeStore {
    /// Wrap a keyframe sequence as written. Fails with `NotLoaded` when empty.
    pub fn new(keyframes: Vec<Keyframe>) -> Result<Self, AnimatorError> {
        if keyframes.is_empty() {
            return Err(AnimatorError::NotLoaded);
        }
        let ordered = keyframes.windows(2).all(|w| w[0].time <= w[1].time);
        Ok(Self { keyframes, ordered })
    }

    /// Time of the first keyframe
    #[inline]
    pub fn start(&self) -> f64 {
        self.keyframes[0].time
    }

    /// Time of the last keyframe
    #[inline]
    pub fn end(&self) -> f64 {
        self.keyframes[self.keyframes.len() - 1].time
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.keyframes.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.keyframes.is_empty()
    }

    /// Whether keyframe times are non-decreasing
    #[inline]
    pub fn is_ordered(&self) -> bool {
        self.ordered
    }

    #[inline]
    pub fn get(&self, index: usize) -> Option<&Keyframe> {
        self.keyframes.get(index)
    }

    /// Keyframe at an index produced by [`KeyframeStore::bracket`].
    #[inline]
    pub(crate) fn at(&self, index: usize) -> &Keyframe {
        &self.keyframes[index]
    }

    #[inline]
    pub fn first(&self) -> &Keyframe {
        &self.keyframes[0]
    }

    pub fn iter(&self) -> impl Iterator<Item = &Keyframe> {
        self.keyframes.iter()
    }

    /// Locate the keyframes around `time`.
    ///
    /// `current` is the last keyframe at or before `time` (the first keyframe
    /// when `time` precedes them all); the neighbours are clamped to the ends
    /// of the sequence, duplicating the boundary keyframe.
    pub fn bracket(&self, time: f64) -> Bracket {
        let len = self.keyframes.len();
        let first_after = if self.ordered {
            self.keyframes.partition_point(|k| k.time <= time)
        } else {
            self.keyframes
                .iter()
                .position(|k| k.time > time)
                .unwrap_or(len)
        };
        let current = first_after.saturating_sub(1);
        Bracket {
            previous: current.saturating_sub(1),
            current,
            next: (current + 1).min(len - 1),
            later: (current + 2).min(len - 1),
        }
    }

    /// Local segment parameter for `time` within `bracket`; `1` for coincident keyframes.
    pub fn local_t(&self, bracket: &Bracket, time: f64) -> f64 {
        let current = self.keyframes[bracket.current].time;
        let next = self.keyframes[bracket.next].time;
        let span = next - current;
        if span == 0.0 {
            1.0
        } else {
            (time - current) / span
        }
    }
}

impl TryFrom<Vec<Keyframe>> for KeyframeStore {
    type Error = AnimatorError;

    fn try_from(keyframes: Vec<Keyframe>) -> Result<Self, Self::Error> {
        Self::new(keyframes)
    }
}

impl From<KeyframeStore> for Vec<Keyframe> {
    fn from(store: KeyframeStore) -> Self {
        store.keyframes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kf(time: f64, v: f64) -> Keyframe {
        let mut values = HashMap::new();
        values.insert("x".to_string(), Value::Scalar(v));
        Keyframe::new(time, values)
    }

    fn store(times: &[f64]) -> KeyframeStore {
        KeyframeStore::new(times.iter().map(|&t| kf(t, t)).collect()).unwrap()
    }

    #[test]
    fn empty_store_is_rejected() {
        assert_eq!(KeyframeStore::new(vec![]), Err(AnimatorError::NotLoaded));
    }

    #[test]
    fn bracket_inside_sequence() {
        let s = store(&[0.0, 10.0, 20.0, 30.0]);
        let b = s.bracket(15.0);
        assert_eq!(
            b,
            Bracket {
                previous: 0,
                current: 1,
                next: 2,
                later: 3
            }
        );
        assert_eq!(s.local_t(&b, 15.0), 0.5);
    }

    #[test]
    fn bracket_clamps_at_both_ends() {
        let s = store(&[0.0, 10.0, 20.0]);
        let before = s.bracket(-5.0);
        assert_eq!(
            before,
            Bracket {
                previous: 0,
                current: 0,
                next: 1,
                later: 2
            }
        );
        assert_eq!(s.local_t(&before, -5.0), -0.5);

        let after = s.bracket(25.0);
        assert_eq!(
            after,
            Bracket {
                previous: 1,
                current: 2,
                next: 2,
                later: 2
            }
        );
        assert_eq!(s.local_t(&after, 25.0), 1.0);
    }

    #[test]
    fn exact_time_selects_that_keyframe() {
        let s = store(&[0.0, 10.0, 20.0]);
        let b = s.bracket(10.0);
        assert_eq!(b.current, 1);
        assert_eq!(s.local_t(&b, 10.0), 0.0);
    }

    #[test]
    fn coincident_keyframes_use_t_one() {
        let s = store(&[0.0, 5.0, 5.0, 10.0]);
        let b = s.bracket(5.0);
        assert_eq!(b.current, 2);
        let b = Bracket {
            previous: 0,
            current: 1,
            next: 2,
            later: 3,
        };
        assert_eq!(s.local_t(&b, 5.0), 1.0);
    }

    #[test]
    fn unordered_store_scans_as_written() {
        let s = store(&[0.0, 10.0, 5.0]);
        assert!(!s.is_ordered());
        // first keyframe later than 7 is index 1
        assert_eq!(s.bracket(7.0).current, 0);
    }

    #[test]
    fn deserializing_checks_invariants() {
        assert!(serde_json::from_str::<KeyframeStore>("[]").is_err());

        let s = store(&[0.0, 10.0, 5.0]);
        let json = serde_json::to_string(&s).unwrap();
        let back: KeyframeStore = serde_json::from_str(&json).unwrap();
        assert_eq!(back, s);
        assert!(!back.is_ordered());
        assert_eq!(back.end(), 5.0);
    }

    #[test]
    fn explicit_names_are_tracked() {
        let k = kf(0.0, 1.0);
        assert!(k.is_explicit("x"));
        assert!(!k.is_explicit("y"));
        assert_eq!(k.param_names().collect::<Vec<_>>(), ["x"]);
    }
}
