//! Keyword-driven indicator sets
//!
//! Registration reasons and facility status are free text in the registry.
//! Both are reduced to fixed sets of boolean indicators; the sets are
//! enumerated here so that the record shape is known at compile time.

/// Registration reason indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReasonFlag {
    /// Other reason
    Other,
    /// Relocation
    Moved,
    /// Newly registered
    New,
    /// Change of administrator or succession
    Succession,
    /// Organisational change
    Reorganised,
    /// Change of establisher
    EstablisherChanged,
    /// Renewal
    Renewed,
}

impl ReasonFlag {
    /// Every reason indicator in column order
    pub const ALL: [Self; 7] = [
        Self::Other,
        Self::Moved,
        Self::New,
        Self::Succession,
        Self::Reorganised,
        Self::EstablisherChanged,
        Self::Renewed,
    ];

    /// Keywords whose presence in the reason text sets this indicator
    #[must_use]
    pub const fn keywords(self) -> &'static [&'static str] {
        match self {
            Self::Other => &["その他"],
            Self::Moved => &["移動", "移転", "所在地変", "所変"],
            Self::New => &["新規"],
            Self::Succession => &["交代", "継承"],
            Self::Reorganised => &["組織変更"],
            Self::EstablisherChanged => &["開設者変更", "開設者変", "開変", "開設変更"],
            Self::Renewed => &["更新"],
        }
    }

    /// Whether the reason text carries this indicator
    #[must_use]
    pub fn matches(self, reason: &str) -> bool {
        self.keywords().iter().any(|k| reason.contains(k))
    }
}

/// Facility status indicator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusFlag {
    /// Operation suspended
    Defunct,
    /// Has long-term care beds
    LongTermCare,
    /// Clinic
    Clinic,
    /// Hospital
    Hospital,
    /// General hospital
    General,
    /// Regional medical support hospital
    RegionalSupport,
    /// Advanced treatment hospital
    AdvancedFunction,
}

impl StatusFlag {
    /// Every status indicator in column order
    pub const ALL: [Self; 7] = [
        Self::Defunct,
        Self::LongTermCare,
        Self::Clinic,
        Self::Hospital,
        Self::General,
        Self::RegionalSupport,
        Self::AdvancedFunction,
    ];

    /// Status token that sets this indicator
    #[must_use]
    pub const fn keyword(self) -> &'static str {
        match self {
            Self::Defunct => "休止",
            Self::LongTermCare => "療養病床",
            Self::Clinic => "診療所",
            Self::Hospital => "病院",
            Self::General => "総合",
            Self::RegionalSupport => "地域支援",
            Self::AdvancedFunction => "特定機能",
        }
    }

    /// Whether the status token list carries this indicator
    ///
    /// Membership is exact: `病院` does not match a `総合病院` token.
    #[must_use]
    pub fn matches<S: AsRef<str>>(self, tokens: &[S]) -> bool {
        tokens.iter().any(|t| t.as_ref() == self.keyword())
    }
}
