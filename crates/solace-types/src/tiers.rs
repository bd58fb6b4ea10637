use serde::Serialize;

/// Subscription tier catalog. Static reference data compiled into the binary;
/// nothing here is user-owned state and nothing in the service mutates it.
/// Quota enforcement happens elsewhere (usage accounting is an external
/// collaborator) — the catalog only describes the tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TierId {
    Free,
    Plus,
    Pro,
}

/// Mood-tracking granularity offered at a given tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MoodGranularity {
    /// One mood check-in per day.
    Daily,
    /// A mood attached to every journal entry.
    PerEntry,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct Tier {
    pub id: TierId,
    pub name: &'static str,
    /// `None` means unlimited.
    #[serde(rename = "chatsPerDay")]
    pub chats_per_day: Option<u32>,
    #[serde(rename = "tokensPerMonth")]
    pub tokens_per_month: u64,
    #[serde(rename = "moodGranularity")]
    pub mood_granularity: MoodGranularity,
    /// `None` means unlimited.
    #[serde(rename = "maxJournalEntries")]
    pub max_journal_entries: Option<u32>,
    #[serde(rename = "premiumFeatures")]
    pub premium_features: &'static [&'static str],
}

pub const TIERS: [Tier; 3] = [
    Tier {
        id: TierId::Free,
        name: "Free",
        chats_per_day: Some(15),
        tokens_per_month: 50_000,
        mood_granularity: MoodGranularity::Daily,
        max_journal_entries: Some(30),
        premium_features: &[],
    },
    Tier {
        id: TierId::Plus,
        name: "Plus",
        chats_per_day: Some(150),
        tokens_per_month: 500_000,
        mood_granularity: MoodGranularity::PerEntry,
        max_journal_entries: Some(500),
        premium_features: &["memory", "tts"],
    },
    Tier {
        id: TierId::Pro,
        name: "Pro",
        chats_per_day: None,
        tokens_per_month: 2_000_000,
        mood_granularity: MoodGranularity::PerEntry,
        max_journal_entries: None,
        premium_features: &["memory", "tts", "stt"],
    },
];
