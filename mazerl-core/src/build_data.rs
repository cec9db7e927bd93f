//! Robot build data and its string codec.
use crate::controller::Controller;
use crate::error::CoreError;
use crate::types::{InputType, OutputType};
use anyhow::Result;
use log::debug;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::Path;

/// Default retina side for continuous inputs.
pub const DEFAULT_VISION: usize = 15;

/// Describes a robot's sensing/actuation types and controller choice.
///
/// Codes are parsed with [`BuildData::from_string`]; formatting a value
/// back (via [`fmt::Display`]) always yields the explicit two-letter form
/// followed, for continuous inputs, by the retina size:
///
/// ```
/// use mazerl_core::BuildData;
///
/// let bd = BuildData::from_string("H").unwrap();
/// assert_eq!(bd.to_string(), "CD15");
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BuildData {
    /// Input type.
    pub inputs: InputType,
    /// Output type.
    pub outputs: OutputType,
    /// Retina side, odd; used when `inputs` is continuous.
    pub vision: usize,
    /// Registered kind of the controller driving the robot.
    pub control: String,
    /// Construction parameters handed to the controller factory.
    pub control_data: Map<String, Value>,
}

impl Default for BuildData {
    fn default() -> Self {
        Self {
            inputs: InputType::Discrete,
            outputs: OutputType::Discrete,
            vision: DEFAULT_VISION,
            control: "random".to_string(),
            control_data: Map::new(),
        }
    }
}

impl BuildData {
    /// Parses a robot code into input/output types and, optionally, a
    /// retina size.
    ///
    /// Format is `IO[V]` or `S[V]` where the input letter I and output
    /// letter O are each `D` (discrete) or `C` (continuous), and the
    /// shorthands S are `D`, `H` and `C` for `DD`, `CD` and `CC`. For
    /// continuous inputs, trailing digits V give the retina side as an
    /// odd integer; without digits the default size is kept.
    pub fn from_string(code: &str) -> Result<Self, CoreError> {
        let malformed = || CoreError::MalformedCode(code.to_string());
        let chars: Vec<char> = code.chars().collect();

        match chars.first() {
            Some('D') | Some('C') | Some('H') => {}
            _ => return Err(malformed()),
        }
        if let Some(c) = chars.get(1) {
            if !(matches!(c, 'D' | 'C') || c.is_ascii_digit()) {
                return Err(malformed());
            }
        }
        if !chars.iter().skip(2).all(|c| c.is_ascii_digit()) {
            return Err(malformed());
        }

        let mut bd = Self::default();
        let ix = if chars.get(1).map_or(false, |c| c.is_ascii_alphabetic()) {
            2
        } else {
            1
        };

        if ix == 1 {
            let (i, o) = match chars[0] {
                'D' => (InputType::Discrete, OutputType::Discrete),
                'H' => (InputType::Continuous, OutputType::Discrete),
                'C' => (InputType::Continuous, OutputType::Continuous),
                _ => unreachable!(),
            };
            bd.inputs = i;
            bd.outputs = o;
        } else {
            bd.inputs = InputType::from_letter(chars[0]).ok_or_else(malformed)?;
            bd.outputs = OutputType::from_letter(chars[1]).ok_or_else(malformed)?;
            if bd.inputs == InputType::Discrete && bd.outputs == OutputType::Continuous {
                return Err(CoreError::HybridMode);
            }
        }

        if bd.inputs == InputType::Continuous && chars.len() > ix {
            let vision: usize = code[ix..].parse().map_err(|_| malformed())?;
            if vision % 2 != 1 {
                return Err(CoreError::EvenVision(vision));
            }
            bd.vision = vision;
        }

        Ok(bd)
    }

    /// Creates build data reflecting a controller's single supported
    /// input and output types.
    ///
    /// Fails when the controller supports several input or output types;
    /// the caller must then specify the types explicitly instead. A
    /// controller-reported retina size overrides the default.
    pub fn from_controller(controller: &dyn Controller) -> Result<Self, CoreError> {
        let mut bd = Self::default();

        match controller.input_types() {
            [single] => bd.inputs = *single,
            _ => return Err(CoreError::AmbiguousController("input")),
        }
        match controller.output_types() {
            [single] => bd.outputs = *single,
            _ => return Err(CoreError::AmbiguousController("output")),
        }

        if bd.inputs == InputType::Continuous {
            if let Some(vision) = controller.vision() {
                bd.vision = vision;
            }
        }

        Ok(bd)
    }

    /// Checks the type-combination and retina-size invariants.
    pub fn check(&self) -> Result<(), CoreError> {
        if self.inputs == InputType::Discrete && self.outputs == OutputType::Continuous {
            return Err(CoreError::HybridMode);
        }
        if self.vision % 2 != 1 {
            return Err(CoreError::EvenVision(self.vision));
        }
        Ok(())
    }

    /// Sets the input type.
    pub fn inputs(mut self, inputs: InputType) -> Self {
        self.inputs = inputs;
        self
    }

    /// Sets the output type.
    pub fn outputs(mut self, outputs: OutputType) -> Self {
        self.outputs = outputs;
        self
    }

    /// Sets the retina side.
    pub fn vision(mut self, vision: usize) -> Self {
        self.vision = vision;
        self
    }

    /// Sets the controller kind key.
    pub fn control(mut self, control: &str) -> Self {
        self.control = control.to_lowercase();
        self
    }

    /// Sets the controller construction parameters.
    pub fn control_data(mut self, control_data: Map<String, Value>) -> Self {
        self.control_data = control_data;
        self
    }

    /// Constructs [`BuildData`] from a YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let bd: Self = serde_yaml::from_reader(rdr)?;
        bd.check()?;
        debug!("Loaded robot build data from {:?}", path);
        Ok(bd)
    }

    /// Saves [`BuildData`] as YAML.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        debug!("Saved robot build data into {:?}", path);
        Ok(())
    }
}

impl fmt::Display for BuildData {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.inputs.letter(), self.outputs.letter())?;
        if self.inputs == InputType::Continuous {
            write!(f, "{}", self.vision)?;
        }
        Ok(())
    }
}
