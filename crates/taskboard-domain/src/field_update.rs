/// Partial update of an optional field.
///
/// On the wire `NoChange` omits the field, `Set` sends the value and
/// `Clear` sends an explicit `null`.
///
/// ```
/// use taskboard_domain::FieldUpdate;
///
/// let mut description = Some("draft".to_string());
/// FieldUpdate::Set("final".to_string()).apply_to(&mut description);
/// assert_eq!(description.as_deref(), Some("final"));
///
/// FieldUpdate::<String>::Clear.apply_to(&mut description);
/// assert_eq!(description, None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FieldUpdate<T> {
    #[default]
    NoChange,
    Set(T),
    Clear,
}

impl<T> FieldUpdate<T> {
    pub fn apply_to(self, field: &mut Option<T>) {
        match self {
            FieldUpdate::NoChange => {}
            FieldUpdate::Set(value) => *field = Some(value),
            FieldUpdate::Clear => *field = None,
        }
    }

    pub fn is_change(&self) -> bool {
        !matches!(self, FieldUpdate::NoChange)
    }

    /// Build from CLI-style inputs: a clear flag wins over a value.
    pub fn from_parts(value: Option<T>, clear: bool) -> Self {
        match (value, clear) {
            (_, true) => FieldUpdate::Clear,
            (Some(value), false) => FieldUpdate::Set(value),
            (None, false) => FieldUpdate::NoChange,
        }
    }
}

impl<T> From<Option<T>> for FieldUpdate<T> {
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(value) => FieldUpdate::Set(value),
            None => FieldUpdate::Clear,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_parts() {
        assert_eq!(FieldUpdate::from_parts(Some(1), false), FieldUpdate::Set(1));
        assert_eq!(FieldUpdate::from_parts(Some(1), true), FieldUpdate::Clear);
        assert_eq!(FieldUpdate::<i32>::from_parts(None, false), FieldUpdate::NoChange);
    }

    #[test]
    fn test_no_change_keeps_value() {
        let mut field = Some("keep".to_string());
        FieldUpdate::NoChange.apply_to(&mut field);
        assert_eq!(field.as_deref(), Some("keep"));
        assert!(!FieldUpdate::<String>::NoChange.is_change());
    }
}
