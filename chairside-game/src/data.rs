//! Event catalog data: immutable definitions of risk/opportunity events,
//! their choices, and weighted outcomes.

use serde::{Deserialize, Serialize};
use smallvec::{smallvec, SmallVec};

/// Outcome lists are short; keep them inline without extra allocations.
pub type OutcomeList = SmallVec<[EventOutcome; 3]>;

/// Broad flavor of an event, for presentation layers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventKind {
    Opportunity,
    Risk,
    Neutral,
}

/// One weighted result of a choice. Weights within a choice sum to 100.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventOutcome {
    pub weight: u32,
    pub desc: String,
    #[serde(default)]
    pub cash: i64,
    #[serde(default)]
    pub reputation: i32,
    #[serde(default)]
    pub cleanliness: i32,
}

/// A decision offered while an event is active.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventChoice {
    pub id: String,
    pub label: String,
    /// Upfront cost deducted before the outcome roll; 0 means free.
    #[serde(default)]
    pub cost: i64,
    pub outcomes: OutcomeList,
}

/// An immutable catalog event. Only the *selection* of which event, choice,
/// and outcome applies is runtime state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub desc: String,
    pub kind: EventKind,
    pub choices: Vec<EventChoice>,
}

impl Event {
    #[must_use]
    pub fn choice(&self, choice_id: &str) -> Option<&EventChoice> {
        self.choices.iter().find(|c| c.id == choice_id)
    }
}

/// Container for the full event deck.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct EventData {
    pub events: Vec<Event>,
}

impl EventData {
    /// Create an empty deck (useful for tests that must not fire events).
    #[must_use]
    pub fn empty() -> Self {
        Self { events: Vec::new() }
    }

    /// Load a deck from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed into valid event data.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Create a deck from pre-built events.
    #[must_use]
    pub fn from_events(events: Vec<Event>) -> Self {
        Self { events }
    }

    /// The deck shipped with the game.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            events: vec![
                supplier_discount(),
                news_feature(),
                chair_malfunction(),
                viral_bad_review(),
                health_inspection(),
                lawsuit_threat(),
            ],
        }
    }

    #[must_use]
    pub fn find(&self, event_id: &str) -> Option<&Event> {
        self.events.iter().find(|e| e.id == event_id)
    }
}

fn outcome(weight: u32, desc: &str, cash: i64, reputation: i32, cleanliness: i32) -> EventOutcome {
    EventOutcome {
        weight,
        desc: desc.to_string(),
        cash,
        reputation,
        cleanliness,
    }
}

fn choice(id: &str, label: &str, cost: i64, outcomes: OutcomeList) -> EventChoice {
    EventChoice {
        id: id.to_string(),
        label: label.to_string(),
        cost,
        outcomes,
    }
}

fn event(id: &str, title: &str, desc: &str, kind: EventKind, choices: Vec<EventChoice>) -> Event {
    Event {
        id: id.to_string(),
        title: title.to_string(),
        desc: desc.to_string(),
        kind,
        choices,
    }
}

fn supplier_discount() -> Event {
    event(
        "supplier-discount",
        "Supplier Discount",
        "Your supply company offers a bulk discount on materials.",
        EventKind::Opportunity,
        vec![
            choice(
                "bulk-buy",
                "Buy 3 months of supplies for $400",
                400,
                smallvec![
                    outcome(40, "Great decision! Operations run smoothly.", 200, 1, 0),
                    outcome(60, "Supplies sit unused. You break even.", 0, 0, 0),
                ],
            ),
            choice(
                "skip",
                "Skip the offer",
                0,
                smallvec![outcome(100, "You continue with regular purchases.", 0, 0, 0)],
            ),
        ],
    )
}

fn news_feature() -> Event {
    event(
        "news-feature",
        "Local News Feature",
        "A health reporter wants to feature your clinic in an article.",
        EventKind::Opportunity,
        vec![
            choice(
                "invest",
                "Invest $600 in professional marketing materials",
                600,
                smallvec![
                    outcome(50, "The article is a huge success!", 1_200, 15, 0),
                    outcome(30, "The article gets moderate attention.", 300, 5, 0),
                    outcome(20, "The article gets little attention.", 0, -1, 0),
                ],
            ),
            choice(
                "decline",
                "Decline - focus on current patients",
                0,
                smallvec![outcome(100, "You miss the opportunity.", 0, 0, 0)],
            ),
        ],
    )
}

fn chair_malfunction() -> Event {
    event(
        "chair-malfunction",
        "Treatment Chair Malfunction",
        "Your main treatment chair has stopped working!",
        EventKind::Risk,
        vec![
            choice(
                "repair",
                "Pay $300 for immediate repair",
                300,
                smallvec![
                    outcome(80, "Fixed quickly. Patients are impressed.", 0, 2, 0),
                    outcome(20, "Fixed, but some patients left bad reviews.", 0, -1, 0),
                ],
            ),
            choice(
                "wait",
                "Wait for a cheaper repair",
                0,
                smallvec![
                    outcome(40, "Only a few patients are frustrated.", -150, -2, 0),
                    outcome(60, "Many patients leave bad reviews.", -300, -6, 0),
                ],
            ),
        ],
    )
}

fn viral_bad_review() -> Event {
    event(
        "viral-bad-review",
        "Viral Bad Review",
        "A scathing review is starting to go viral on social media.",
        EventKind::Risk,
        vec![
            choice(
                "pr-control",
                "Pay $200 for PR damage control",
                200,
                smallvec![
                    outcome(50, "PR contains the damage.", 0, -3, 0),
                    outcome(50, "The review spreads despite PR.", 0, -8, 0),
                ],
            ),
            choice(
                "ignore",
                "Ignore it and hope it blows over",
                0,
                smallvec![
                    outcome(20, "The review fades away naturally.", 0, -2, 0),
                    outcome(80, "The review goes viral!", -400, -20, 0),
                ],
            ),
        ],
    )
}

fn health_inspection() -> Event {
    event(
        "health-inspection",
        "Surprise Health Inspection",
        "The health department is conducting a surprise inspection.",
        EventKind::Risk,
        vec![
            choice(
                "emergency-clean",
                "Pay $250 for emergency deep cleaning",
                250,
                smallvec![
                    outcome(80, "You pass with flying colors!", 0, 5, 10),
                    outcome(20, "Minor issues noted, but you pass.", 0, 1, 5),
                ],
            ),
            choice(
                "risk-it",
                "Hope current standards are sufficient",
                0,
                smallvec![
                    outcome(60, "You pass the inspection.", 0, 2, 0),
                    outcome(40, "You fail badly and pay a fine.", -600, -8, 0),
                ],
            ),
        ],
    )
}

fn lawsuit_threat() -> Event {
    event(
        "lawsuit-threat",
        "Malpractice Lawsuit Threat",
        "A former patient is threatening to sue for malpractice.",
        EventKind::Risk,
        vec![
            choice(
                "settle",
                "Settle out of court ($1000)",
                1_000,
                smallvec![outcome(100, "Settlement reached. Case closed.", 0, -5, 0)],
            ),
            choice(
                "fight",
                "Fight in court ($200 legal fees)",
                200,
                smallvec![
                    outcome(30, "You win the case!", 0, 5, 0),
                    outcome(70, "You lose. Massive settlement.", -1_800, -25, 0),
                ],
            ),
            choice(
                "ignore",
                "Ignore the threat",
                0,
                smallvec![
                    outcome(80, "The lawsuit proceeds. You lose badly.", -1_500, -30, 0),
                    outcome(20, "The patient drops the case.", 0, 0, 0),
                ],
            ),
        ],
    )
}
