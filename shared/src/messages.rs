pub const STATUS_READY: &str = "Clique para Girar";
pub const STATUS_SPINNING: &str = "Girando...";

pub const LOST_TURN_MESSAGE: &str = "Não foi dessa vez!";
pub const TRY_AGAIN_MESSAGE: &str = "Sorte! Tente mais uma vez.";

const LOST_TURN_MARKER: &str = "perdeu a vez";
const TRY_AGAIN_MARKER: &str = "tente novamente";

/// How a resolved label is presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutcomeKind {
    Prize,
    LostTurn,
    /// Grants one spin that skips registration.
    TryAgain,
}

impl OutcomeKind {
    pub fn for_label(label: &str) -> Self {
        let lower = label.to_lowercase();
        if lower.contains(LOST_TURN_MARKER) {
            Self::LostTurn
        } else if lower.contains(TRY_AGAIN_MARKER) {
            Self::TryAgain
        } else {
            Self::Prize
        }
    }

    pub fn grants_retry(self) -> bool {
        self == Self::TryAgain
    }
}

pub fn message_for(label: &str) -> String {
    match OutcomeKind::for_label(label) {
        OutcomeKind::LostTurn => LOST_TURN_MESSAGE.to_string(),
        OutcomeKind::TryAgain => TRY_AGAIN_MESSAGE.to_string(),
        OutcomeKind::Prize => format!("Você ganhou: {}!", label),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_follow_label_markers() {
        assert_eq!(message_for("Perdeu a vez"), LOST_TURN_MESSAGE);
        assert_eq!(message_for("TENTE NOVAMENTE"), TRY_AGAIN_MESSAGE);
        assert_eq!(message_for("Garrafa"), "Você ganhou: Garrafa!");
    }

    #[test]
    fn only_try_again_grants_retry() {
        assert!(OutcomeKind::for_label("Tente novamente").grants_retry());
        assert!(!OutcomeKind::for_label("Perdeu a vez").grants_retry());
        assert!(!OutcomeKind::for_label("5% de desconto").grants_retry());
    }
}
