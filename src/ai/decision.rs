//! Bot decisions.
//!
//! A decision provider sees a `DecisionContext` (the active player's view
//! of the match) and answers with a `Decision`. External providers answer
//! in a JSON wire form:
//!
//! ```json
//! { "action": "play" | "attack" | "end", "cardId": "c4", "targetId": "c9" }
//! ```
//!
//! Anything that does not parse into a usable decision becomes `End`.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::cards::{Card, CardId, KeywordSet, ParseCardIdError};
use crate::core::{Action, AttackDeclaration, MatchSnapshot, Phase, Player};

/// Why a provider could not produce a decision.
#[derive(Debug, thiserror::Error)]
pub enum DecisionError {
    #[error("decision is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("unknown decision action {0:?}")]
    UnknownAction(String),

    #[error("{0} decision is missing a card id")]
    MissingCard(&'static str),

    #[error(transparent)]
    InvalidCardId(#[from] ParseCardIdError),

    #[error("decision provider unavailable: {0}")]
    Unavailable(String),
}

/// What a bot wants to do next.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Decision {
    /// Play a card from hand.
    Play(CardId),
    /// Attack with `attacker`, blocked by `target` when given.
    Attack {
        attacker: CardId,
        target: Option<CardId>,
    },
    /// End the current phase.
    End,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireDecision {
    action: String,
    #[serde(default)]
    card_id: Value,
    #[serde(default)]
    target_id: Value,
}

fn card_ref(value: &Value) -> Result<Option<CardId>, DecisionError> {
    match value {
        Value::Null => Ok(None),
        Value::String(text) if text.is_empty() => Ok(None),
        Value::String(text) => Ok(Some(text.parse()?)),
        Value::Number(n) => n
            .as_u64()
            .and_then(|n| u32::try_from(n).ok())
            .map(|n| Some(CardId::new(n)))
            .ok_or_else(|| ParseCardIdError(n.to_string()).into()),
        other => Err(ParseCardIdError(other.to_string()).into()),
    }
}

impl Decision {
    /// Parse the JSON wire form strictly.
    pub fn parse_json(text: &str) -> Result<Self, DecisionError> {
        let wire: WireDecision = serde_json::from_str(text.trim())?;
        let card = card_ref(&wire.card_id)?;

        match wire.action.as_str() {
            "play" => card.map(Decision::Play).ok_or(DecisionError::MissingCard("play")),
            "attack" => {
                let attacker = card.ok_or(DecisionError::MissingCard("attack"))?;
                Ok(Decision::Attack {
                    attacker,
                    target: card_ref(&wire.target_id)?,
                })
            }
            "end" => Ok(Decision::End),
            other => Err(DecisionError::UnknownAction(other.to_string())),
        }
    }

    /// Parse the JSON wire form, falling back to `End` on any problem.
    ///
    /// ```
    /// use kudurru_rules::ai::Decision;
    /// use kudurru_rules::cards::CardId;
    ///
    /// assert_eq!(
    ///     Decision::from_json(r#"{"action":"play","cardId":"c4"}"#),
    ///     Decision::Play(CardId::new(4))
    /// );
    /// assert_eq!(Decision::from_json("I'd rather not"), Decision::End);
    /// ```
    #[must_use]
    pub fn from_json(text: &str) -> Self {
        Self::parse_json(text).unwrap_or_else(|err| {
            tracing::warn!("unusable decision ({}), ending phase", err);
            Decision::End
        })
    }

    /// The verb this decision maps to. Attacks carry at most one blocker
    /// and no allocations.
    #[must_use]
    pub fn into_action(self) -> Action {
        match self {
            Decision::Play(card) => Action::PlayCard { card: Some(card) },
            Decision::Attack { attacker, target } => {
                let declaration = AttackDeclaration::new(attacker);
                Action::Attack(match target {
                    Some(blocker) => declaration.blocked_by(blocker),
                    None => declaration,
                })
            }
            Decision::End => Action::EndPhase,
        }
    }
}

/// The active player's view of the match.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DecisionContext {
    pub phase: Phase,
    pub player: Player,

    /// Every other seat in turn order, starting with the defender.
    pub opponents: Vec<Player>,

    pub hand: Vec<Card>,
    pub battlefield: Vec<Card>,
}

impl DecisionContext {
    /// Build the context for the active player, if there is one.
    #[must_use]
    pub fn from_snapshot(snapshot: &MatchSnapshot) -> Option<Self> {
        let seat = snapshot.players.iter().position(|p| p.is_active)?;
        let player = snapshot.players[seat].clone();
        let count = snapshot.players.len();
        let opponents = (1..count)
            .map(|offset| snapshot.players[(seat + offset) % count].clone())
            .collect();

        Some(Self {
            phase: snapshot.phase,
            hand: player.zones.hand.iter().cloned().collect(),
            battlefield: player.zones.battlefield.iter().cloned().collect(),
            player,
            opponents,
        })
    }

    /// The seat this player attacks.
    #[must_use]
    pub fn defender(&self) -> Option<&Player> {
        self.opponents.first()
    }

    /// Decisions the rules would accept right now.
    ///
    /// - Main: every affordable card in hand
    /// - Battle: every ready attacker with power, unblocked or into each
    ///   Taunt card; nothing while the defender has no marks left
    ///
    /// `End` is always last.
    #[must_use]
    pub fn legal_decisions(&self) -> Vec<Decision> {
        let mut decisions = Vec::new();

        match self.phase {
            Phase::Main => {
                decisions.extend(
                    self.hand
                        .iter()
                        .filter(|card| self.player.resources.covers(&card.cost))
                        .map(|card| Decision::Play(card.id)),
                );
            }
            Phase::Battle => {
                if let Some(defender) = self.defender().filter(|d| d.is_alive()) {
                    let taunts: Vec<CardId> = defender
                        .zones
                        .battlefield
                        .iter()
                        .filter(|card| card.keywords().intersects(KeywordSet::TAUNT))
                        .map(|card| card.id)
                        .collect();

                    for attacker in self
                        .battlefield
                        .iter()
                        .filter(|card| card.is_ready() && card.power > 0)
                    {
                        if taunts.is_empty() {
                            decisions.push(Decision::Attack {
                                attacker: attacker.id,
                                target: None,
                            });
                        }
                        decisions.extend(taunts.iter().map(|&taunt| Decision::Attack {
                            attacker: attacker.id,
                            target: Some(taunt),
                        }));
                    }
                }
            }
            Phase::Upkeep | Phase::End => {}
        }

        decisions.push(Decision::End);
        decisions
    }
}
