use std::fmt;

/// Lifecycle state of the monitored connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConnectionState {
    #[default]
    Connecting,
    Open,
    Closed,
    Errored,
}

impl ConnectionState {
    /// `Closed` and `Errored` never transition again.
    pub fn is_terminal(self) -> bool {
        matches!(self, ConnectionState::Closed | ConnectionState::Errored)
    }

    /// Whether `self -> next` is a legal transition.
    pub fn can_transition_to(self, next: ConnectionState) -> bool {
        use ConnectionState::*;
        matches!(
            (self, next),
            (Connecting, Open) | (Open, Closed) | (Open, Errored) | (Connecting, Errored)
        )
    }
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ConnectionState::Connecting => "connecting",
            ConnectionState::Open => "open",
            ConnectionState::Closed => "closed",
            ConnectionState::Errored => "errored",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::ConnectionState::*;
    use super::*;

    const ALL: [ConnectionState; 4] = [Connecting, Open, Closed, Errored];

    #[test]
    fn test_legal_transitions() {
        assert!(Connecting.can_transition_to(Open));
        assert!(Connecting.can_transition_to(Errored));
        assert!(Open.can_transition_to(Closed));
        assert!(Open.can_transition_to(Errored));

        assert!(!Connecting.can_transition_to(Closed));
        assert!(!Open.can_transition_to(Open));
        assert!(!Open.can_transition_to(Connecting));
    }

    #[test]
    fn test_terminal_states_are_final() {
        for from in [Closed, Errored] {
            assert!(from.is_terminal());
            for to in ALL {
                assert!(!from.can_transition_to(to), "{} -> {}", from, to);
            }
        }
        assert!(!Connecting.is_terminal());
        assert!(!Open.is_terminal());
    }
}
