/// Every gesture a detector can report.
///
/// Used to describe mutually exclusive gestures: while a progressive gesture
/// of one type is in progress, the other types of its exclusive set cannot
/// execute.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum GestureType {
    Scroll = 0,
    Scale = 1,
    Rotate = 2,
    Shove = 3,
    MultiFingerTap = 4,
    SingleTapUp = 5,
    LongPress = 6,
    Fling = 7,
    ShowPress = 8,
    Down = 9,
    DoubleTap = 10,
    DoubleTapEvent = 11,
    SingleTapConfirmed = 12,
    Move = 13,
    SidewaysShove = 14,
    QuickScale = 15,
}

impl GestureType {
    pub const ALL: [GestureType; 16] = [
        GestureType::Scroll,
        GestureType::Scale,
        GestureType::Rotate,
        GestureType::Shove,
        GestureType::MultiFingerTap,
        GestureType::SingleTapUp,
        GestureType::LongPress,
        GestureType::Fling,
        GestureType::ShowPress,
        GestureType::Down,
        GestureType::DoubleTap,
        GestureType::DoubleTapEvent,
        GestureType::SingleTapConfirmed,
        GestureType::Move,
        GestureType::SidewaysShove,
        GestureType::QuickScale,
    ];

    fn bit(self) -> u16 {
        1 << (self as u8)
    }
}

/// A set of [`GestureType`]s stored as a bit mask.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GestureTypeSet(u16);

impl GestureTypeSet {
    pub const EMPTY: Self = Self(0);

    pub fn new() -> Self {
        Self::EMPTY
    }

    pub fn of(types: &[GestureType]) -> Self {
        types.iter().copied().collect()
    }

    pub fn with(mut self, gesture: GestureType) -> Self {
        self.insert(gesture);
        self
    }

    pub fn insert(&mut self, gesture: GestureType) {
        self.0 |= gesture.bit();
    }

    pub fn remove(&mut self, gesture: GestureType) {
        self.0 &= !gesture.bit();
    }

    pub fn contains(&self, gesture: GestureType) -> bool {
        (self.0 & gesture.bit()) != 0
    }

    pub fn intersects(&self, other: GestureTypeSet) -> bool {
        (self.0 & other.0) != 0
    }

    pub fn union(self, other: GestureTypeSet) -> Self {
        Self(self.0 | other.0)
    }

    pub fn is_empty(&self) -> bool {
        self.0 == 0
    }

    pub fn len(&self) -> usize {
        self.0.count_ones() as usize
    }

    pub fn iter(&self) -> impl Iterator<Item = GestureType> + '_ {
        GestureType::ALL.into_iter().filter(|g| self.contains(*g))
    }
}

impl FromIterator<GestureType> for GestureTypeSet {
    fn from_iter<I: IntoIterator<Item = GestureType>>(iter: I) -> Self {
        let mut set = Self::EMPTY;
        for gesture in iter {
            set.insert(gesture);
        }
        set
    }
}

impl From<GestureType> for GestureTypeSet {
    fn from(gesture: GestureType) -> Self {
        Self::EMPTY.with(gesture)
    }
}
