use super::settings::OrientationAxis;

/// A single problem with a [`PlacementSettings`](super::PlacementSettings).
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SettingsError {
    #[error("forward_axis is not set")]
    ForwardAxisUnset,
    #[error("up_axis is not set")]
    UpAxisUnset,
    #[error("instantiation method is not set")]
    MethodUnset,
    #[error(
        "up_axis {} lies on the same line as forward_axis {}",
        .up.display_name(),
        .forward.display_name()
    )]
    ParallelAxes {
        forward: OrientationAxis,
        up: OrientationAxis,
    },
    #[error("section_length must be a positive finite number, got {0}")]
    InvalidSectionLength(f32),
}

/// Every violation found in one validation pass. Never empty.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
#[error("invalid placement settings: {}", join(.0))]
pub struct SettingsErrors(Vec<SettingsError>);

fn join(errors: &[SettingsError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl SettingsErrors {
    /// Wrap a list of errors, or `None` if there are none.
    pub fn from_vec(errors: Vec<SettingsError>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(Self(errors))
        }
    }

    pub fn contains(&self, error: &SettingsError) -> bool {
        self.0.contains(error)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SettingsError> {
        self.0.iter()
    }
}

impl<'a> IntoIterator for &'a SettingsErrors {
    type Item = &'a SettingsError;
    type IntoIter = std::slice::Iter<'a, SettingsError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_joins_all_errors() {
        let errors = SettingsErrors::from_vec(vec![
            SettingsError::ForwardAxisUnset,
            SettingsError::MethodUnset,
        ])
        .unwrap();

        assert_eq!(
            errors.to_string(),
            "invalid placement settings: forward_axis is not set; instantiation method is not set"
        );
    }

    #[test]
    fn test_display_single_error() {
        let errors = SettingsErrors::from_vec(vec![SettingsError::InvalidSectionLength(-2.0)]).unwrap();
        assert_eq!(
            errors.to_string(),
            "invalid placement settings: section_length must be a positive finite number, got -2"
        );
    }

    #[test]
    fn test_parallel_axes_message() {
        let error = SettingsError::ParallelAxes {
            forward: OrientationAxis::X,
            up: OrientationAxis::NegX,
        };
        assert_eq!(error.to_string(), "up_axis -X lies on the same line as forward_axis X");
    }

    #[test]
    fn test_empty_list_is_not_an_error() {
        assert!(SettingsErrors::from_vec(Vec::new()).is_none());
    }
}
