use thiserror::Error;

/// Errors returned by [`ParamTable`] operations.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParamError {
    #[error("unknown parameter `{0}`")]
    UnknownParam(String),

    #[error("`{name}` = {value} is outside [{min}, {max}]")]
    OutOfRange {
        name: String,
        value: f32,
        min: f32,
        max: f32,
    },

    #[error("`{name}` is a {actual}, not a {expected}")]
    KindMismatch {
        name: String,
        expected: &'static str,
        actual: &'static str,
    },
}

/// Shape of a parameter, as shown by the panel.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ParamKind {
    Slider { min: f32, max: f32, step: f32 },
    Toggle,
    Action,
}

impl ParamKind {
    fn label(self) -> &'static str {
        match self {
            ParamKind::Slider { .. } => "slider",
            ParamKind::Toggle => "toggle",
            ParamKind::Action => "action",
        }
    }
}

type Getter<S, T> = Box<dyn Fn(&S) -> T>;
type Setter<S, T> = Box<dyn Fn(&mut S, T)>;

enum Binding<S> {
    Slider {
        min: f32,
        max: f32,
        step: f32,
        get: Getter<S, f32>,
        set: Setter<S, f32>,
    },
    Toggle {
        get: Getter<S, bool>,
        set: Setter<S, bool>,
    },
    Action {
        run: Box<dyn Fn(&mut S)>,
    },
}

impl<S> Binding<S> {
    fn kind(&self) -> ParamKind {
        match *self {
            Binding::Slider { min, max, step, .. } => ParamKind::Slider { min, max, step },
            Binding::Toggle { .. } => ParamKind::Toggle,
            Binding::Action { .. } => ParamKind::Action,
        }
    }
}

struct Param<S> {
    name: String,
    binding: Binding<S>,
}

/// Snaps `value` to the nearest multiple of `step` above `min`, within range.
fn snap(value: f32, min: f32, max: f32, step: f32) -> f32 {
    // Range ends stay exact even when the range is not a multiple of step.
    if step <= 0.0 || value <= min || value >= max {
        return value.clamp(min, max);
    }
    let steps = ((value - min) / step).round();
    (min + steps * step).clamp(min, max)
}

/// Ordered table of named parameters bound to fields of an application state `S`.
///
/// Each parameter carries getter/setter closures instead of pointing at the
/// state directly, so the table can be built before the state exists and
/// applied to it from the input handler. Names are unique; registering a name
/// twice replaces the earlier binding in place.
pub struct ParamTable<S> {
    params: Vec<Param<S>>,
}

impl<S> Default for ParamTable<S> {
    fn default() -> Self {
        Self { params: Vec::new() }
    }
}

impl<S> std::fmt::Debug for ParamTable<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.params.iter().map(|p| (&p.name, p.binding.kind())))
            .finish()
    }
}

impl<S> ParamTable<S> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a numeric parameter in `[min, max]` that snaps to `step`.
    pub fn slider(
        &mut self,
        name: impl Into<String>,
        min: f32,
        max: f32,
        step: f32,
        get: impl Fn(&S) -> f32 + 'static,
        set: impl Fn(&mut S, f32) + 'static,
    ) -> &mut Self {
        debug_assert!(min <= max, "slider range is inverted");
        self.insert(
            name.into(),
            Binding::Slider {
                min,
                max,
                step,
                get: Box::new(get),
                set: Box::new(set),
            },
        )
    }

    /// Registers a boolean parameter.
    pub fn toggle(
        &mut self,
        name: impl Into<String>,
        get: impl Fn(&S) -> bool + 'static,
        set: impl Fn(&mut S, bool) + 'static,
    ) -> &mut Self {
        self.insert(
            name.into(),
            Binding::Toggle {
                get: Box::new(get),
                set: Box::new(set),
            },
        )
    }

    /// Registers a command with no value.
    pub fn action(&mut self, name: impl Into<String>, run: impl Fn(&mut S) + 'static) -> &mut Self {
        self.insert(name.into(), Binding::Action { run: Box::new(run) })
    }

    fn insert(&mut self, name: String, binding: Binding<S>) -> &mut Self {
        match self.params.iter_mut().find(|p| p.name == name) {
            Some(existing) => existing.binding = binding,
            None => self.params.push(Param { name, binding }),
        }
        self
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.params.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.params.is_empty()
    }

    /// Parameter names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.params.iter().map(|p| p.name.as_str())
    }

    pub fn kind(&self, name: &str) -> Option<ParamKind> {
        self.index_of(name).map(|i| self.params[i].binding.kind())
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.params.iter().position(|p| p.name == name)
    }

    pub(crate) fn name_at(&self, index: usize) -> &str {
        &self.params[index].name
    }

    pub(crate) fn kind_at(&self, index: usize) -> ParamKind {
        self.params[index].binding.kind()
    }

    fn find(&self, name: &str) -> Result<&Param<S>, ParamError> {
        self.params
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| ParamError::UnknownParam(name.to_string()))
    }

    fn mismatch(param: &Param<S>, expected: &'static str) -> ParamError {
        ParamError::KindMismatch {
            name: param.name.clone(),
            expected,
            actual: param.binding.kind().label(),
        }
    }

    /// Current value of a slider.
    pub fn value(&self, state: &S, name: &str) -> Result<f32, ParamError> {
        let param = self.find(name)?;
        match &param.binding {
            Binding::Slider { get, .. } => Ok(get(state)),
            _ => Err(Self::mismatch(param, "slider")),
        }
    }

    /// Current value of a toggle.
    pub fn flag(&self, state: &S, name: &str) -> Result<bool, ParamError> {
        let param = self.find(name)?;
        match &param.binding {
            Binding::Toggle { get, .. } => Ok(get(state)),
            _ => Err(Self::mismatch(param, "toggle")),
        }
    }

    /// Sets a slider. Values outside the range are rejected; accepted values
    /// snap to the step. Returns the value actually applied.
    pub fn set(&self, state: &mut S, name: &str, value: f32) -> Result<f32, ParamError> {
        let param = self.find(name)?;
        let Binding::Slider { min, max, step, set, .. } = &param.binding else {
            return Err(Self::mismatch(param, "slider"));
        };

        if !(value >= *min && value <= *max) {
            return Err(ParamError::OutOfRange {
                name: param.name.clone(),
                value,
                min: *min,
                max: *max,
            });
        }

        let applied = snap(value, *min, *max, *step);
        set(state, applied);
        log::info!("{} = {}", param.name, applied);
        Ok(applied)
    }

    /// Sets a slider from a position in `[0, 1]` along its range.
    pub fn set_normalized(&self, state: &mut S, name: &str, t: f32) -> Result<f32, ParamError> {
        let param = self.find(name)?;
        let Binding::Slider { min, max, .. } = &param.binding else {
            return Err(Self::mismatch(param, "slider"));
        };
        let value = (min + t.clamp(0.0, 1.0) * (max - min)).clamp(*min, *max);
        self.set(state, name, value)
    }

    /// Moves a slider by `steps` increments, clamped to its range.
    pub fn nudge(&self, state: &mut S, name: &str, steps: i32) -> Result<f32, ParamError> {
        let param = self.find(name)?;
        let Binding::Slider { min, max, step, get, .. } = &param.binding else {
            return Err(Self::mismatch(param, "slider"));
        };
        let target = (get(state) + steps as f32 * step).clamp(*min, *max);
        self.set(state, name, target)
    }

    /// Slider value mapped to `[0, 1]` over its range.
    pub fn normalized(&self, state: &S, name: &str) -> Result<f32, ParamError> {
        let param = self.find(name)?;
        let Binding::Slider { min, max, get, .. } = &param.binding else {
            return Err(Self::mismatch(param, "slider"));
        };
        if max <= min {
            return Ok(0.0);
        }
        Ok(((get(state) - min) / (max - min)).clamp(0.0, 1.0))
    }

    /// Flips a toggle and returns its new value.
    pub fn toggle_flag(&self, state: &mut S, name: &str) -> Result<bool, ParamError> {
        let param = self.find(name)?;
        let Binding::Toggle { get, set } = &param.binding else {
            return Err(Self::mismatch(param, "toggle"));
        };
        let next = !get(state);
        set(state, next);
        log::info!("{} = {}", param.name, next);
        Ok(next)
    }

    /// Sets a toggle.
    pub fn set_flag(&self, state: &mut S, name: &str, on: bool) -> Result<(), ParamError> {
        let param = self.find(name)?;
        let Binding::Toggle { set, .. } = &param.binding else {
            return Err(Self::mismatch(param, "toggle"));
        };
        set(state, on);
        log::info!("{} = {}", param.name, on);
        Ok(())
    }

    /// Runs an action.
    pub fn trigger(&self, state: &mut S, name: &str) -> Result<(), ParamError> {
        let param = self.find(name)?;
        let Binding::Action { run } = &param.binding else {
            return Err(Self::mismatch(param, "action"));
        };
        log::info!("{}", param.name);
        run(state);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct State {
        y: f32,
        shown: bool,
        fired: u32,
    }

    fn table() -> ParamTable<State> {
        let mut t: ParamTable<State> = ParamTable::new();
        t.slider("y", -3.0, 3.0, 0.01, |s: &State| s.y, |s, v| s.y = v)
            .toggle("shown", |s: &State| s.shown, |s, v| s.shown = v)
            .action("fire", |s: &mut State| s.fired += 1);
        t
    }

    #[test]
    fn set_within_range_snaps_to_step() {
        let t = table();
        let mut s = State::default();
        let applied = t.set(&mut s, "y", 1.234_9).unwrap();
        assert!((applied - 1.23).abs() < 1e-4);
        assert_eq!(s.y, applied);
    }

    #[test]
    fn set_rejects_out_of_range_and_nan() {
        let t = table();
        let mut s = State::default();
        assert!(matches!(t.set(&mut s, "y", 3.5), Err(ParamError::OutOfRange { .. })));
        assert!(matches!(t.set(&mut s, "y", f32::NAN), Err(ParamError::OutOfRange { .. })));
        assert_eq!(s.y, 0.0);
    }

    #[test]
    fn range_endpoints_are_accepted() {
        let t = table();
        let mut s = State::default();
        assert_eq!(t.set(&mut s, "y", -3.0).unwrap(), -3.0);
        assert_eq!(t.set(&mut s, "y", 3.0).unwrap(), 3.0);
    }

    #[test]
    fn unknown_and_mismatched_names_error() {
        let t = table();
        let mut s = State::default();
        assert_eq!(
            t.set(&mut s, "nope", 0.0),
            Err(ParamError::UnknownParam("nope".into()))
        );
        assert!(matches!(
            t.set(&mut s, "shown", 1.0),
            Err(ParamError::KindMismatch { expected: "slider", actual: "toggle", .. })
        ));
        assert!(t.trigger(&mut s, "y").is_err());
    }

    #[test]
    fn nudge_moves_by_steps_and_clamps() {
        let t = table();
        let mut s = State::default();
        let v = t.nudge(&mut s, "y", 10).unwrap();
        assert!((v - 0.1).abs() < 1e-4);
        let v = t.nudge(&mut s, "y", 10_000).unwrap();
        assert_eq!(v, 3.0);
    }

    #[test]
    fn normalized_maps_range_to_unit_interval() {
        let t = table();
        let mut s = State::default();
        assert!((t.normalized(&s, "y").unwrap() - 0.5).abs() < 1e-6);
        t.set_normalized(&mut s, "y", 1.0).unwrap();
        assert_eq!(s.y, 3.0);
    }

    #[test]
    fn toggle_and_trigger_mutate_state() {
        let t = table();
        let mut s = State::default();
        assert!(t.toggle_flag(&mut s, "shown").unwrap());
        assert!(s.shown);
        t.trigger(&mut s, "fire").unwrap();
        t.trigger(&mut s, "fire").unwrap();
        assert_eq!(s.fired, 2);
    }

    #[test]
    fn set_flag_is_idempotent_and_kind_checked() {
        let t = table();
        let mut s = State::default();
        t.set_flag(&mut s, "shown", true).unwrap();
        t.set_flag(&mut s, "shown", true).unwrap();
        assert!(s.shown);
        assert!(t.flag(&s, "shown").unwrap());
        t.set_flag(&mut s, "shown", false).unwrap();
        assert!(!s.shown);
        assert!(matches!(
            t.set_flag(&mut s, "y", true),
            Err(ParamError::KindMismatch { expected: "toggle", actual: "slider", .. })
        ));
    }

    #[test]
    fn registering_a_name_twice_replaces_it() {
        let mut t = table();
        t.slider("y", 0.0, 1.0, 0.5, |s: &State| s.y, |s, v| s.y = v);
        assert_eq!(t.len(), 3);
        assert_eq!(t.kind("y"), Some(ParamKind::Slider { min: 0.0, max: 1.0, step: 0.5 }));
        assert_eq!(t.names().collect::<Vec<_>>(), ["y", "shown", "fire"]);
    }
}
