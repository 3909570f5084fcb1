use colored::*;
use mt_buffalo::*;

struct Writer<'b> {
    buffer: &'b mut String,
    indent: usize,
}

impl<'b> Writer<'b> {
    fn new(buffer: &'b mut String) -> Self {
        Self { buffer, indent: 0 }
    }

    fn increase_indent(&mut self) {
        self.indent += 2;
    }

    fn decrease_indent(&mut self) {
        self.indent -= 2;
    }

    fn write(&mut self, s: String) {
        self.buffer.push_str(&" ".repeat(self.indent));
        self.buffer.push_str(&s);
    }

    fn writeln(&mut self, s: String) {
        self.write(s);
        self.buffer.push('\n');
    }
}

/// An error while dumping a parameter payload.
#[derive(Debug)]
pub enum Error {
    /// The payload is not valid hex.
    Hex(hex::FromHexError),
    /// A parameter layout entry could not be parsed.
    InvalidSpec(String),
    /// A parameter could not be decoded.
    Parameter {
        name: String,
        source: mt_buffalo::Error,
    },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::Hex(e) => write!(f, "invalid hex payload: {e}"),
            Error::InvalidSpec(spec) => write!(f, "invalid parameter `{spec}`"),
            Error::Parameter { name, source } => write!(f, "{name}: {source}"),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::Hex(e) => Some(e),
            Error::InvalidSpec(_) => None,
            Error::Parameter { source, .. } => Some(source),
        }
    }
}

impl From<hex::FromHexError> for Error {
    fn from(e: hex::FromHexError) -> Self {
        Error::Hex(e)
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Where the element count of a list or buffer comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Length {
    /// A fixed count.
    Fixed(usize),
    /// The value of an earlier parameter.
    Field(String),
}

/// One entry of a parameter layout: `name:TYPE[:length]`.
///
/// `length` is either a number or `@name` to take the count from an earlier
/// integer parameter, e.g. `neighborlqilist:LIST_NEIGHBOR_LQI:@neighborlqilistcount`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParameterSpec {
    pub name: String,
    pub parameter_type: ParameterType,
    pub length: Option<Length>,
}

impl std::str::FromStr for ParameterSpec {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidSpec(s.to_string());

        let mut parts = s.split(':');
        let name = parts.next().filter(|n| !n.is_empty()).ok_or_else(invalid)?;
        let parameter_type = parts
            .next()
            .and_then(|ty| ParameterType::from_name(ty).ok())
            .ok_or_else(invalid)?;
        let length = match parts.next() {
            None => None,
            Some(field) if field.len() > 1 && field.starts_with('@') => {
                Some(Length::Field(field[1..].to_string()))
            }
            Some(count) => Some(Length::Fixed(count.parse().map_err(|_| invalid())?)),
        };

        if parts.next().is_some() {
            return Err(invalid());
        }

        Ok(Self {
            name: name.to_string(),
            parameter_type,
            length,
        })
    }
}

pub struct PayloadParser {}

impl PayloadParser {
    pub fn parse_hex(input: &str, specs: &[ParameterSpec]) -> Result<String> {
        let data = hex::decode(input)?;
        Self::parse(&data, specs)
    }

    pub fn parse(input: &[u8], specs: &[ParameterSpec]) -> Result<String> {
        let mut buffalo = Buffalo::new(input);
        let mut decoded: Vec<(&str, Value)> = Vec::with_capacity(specs.len());

        let mut buffer = String::new();
        let mut w = Writer::new(&mut buffer);

        // -----------------------------------------------------------------
        // Parameters
        // -----------------------------------------------------------------
        w.writeln("Parameters".underline().bold().to_string());
        w.increase_indent();

        for spec in specs {
            let options = BuffaloOptions {
                length: Self::resolve_length(spec, &decoded)?,
                start_index: None,
            };

            let value = buffalo
                .read_parameter(&spec.name, spec.parameter_type, &options)
                .map_err(|source| Error::Parameter {
                    name: spec.name.clone(),
                    source,
                })?;

            let label = format!(
                "{} ({})",
                spec.name.bold(),
                spec.parameter_type.to_string().dimmed()
            );

            match &value {
                Value::ListNeighborLqi(list) => {
                    w.writeln(format!("{label}: {} entries", list.len()));
                    w.increase_indent();
                    for (i, neighbor) in list.iter().enumerate() {
                        w.writeln(format!("[{i}]").italic().to_string());
                        w.increase_indent();
                        Self::write_neighbor(&mut w, neighbor);
                        w.decrease_indent();
                    }
                    w.decrease_indent();
                }
                value => w.writeln(format!("{label}: {}", value.to_string().bright_blue())),
            }

            decoded.push((spec.name.as_str(), value));
        }
        w.decrease_indent();

        // -----------------------------------------------------------------
        // Trailing bytes
        // -----------------------------------------------------------------
        if buffalo.has_remaining() {
            let position = buffalo.position();
            w.writeln(format!("{}", "Trailing".underline().bold()));
            w.increase_indent();
            w.writeln(format!("{:02x?}", &input[position..]));
            w.decrease_indent();
        }

        Ok(buffer)
    }

    fn resolve_length(spec: &ParameterSpec, decoded: &[(&str, Value)]) -> Result<Option<usize>> {
        match &spec.length {
            None => Ok(None),
            Some(Length::Fixed(count)) => Ok(Some(*count)),
            Some(Length::Field(field)) => decoded
                .iter()
                .rev()
                .find(|(name, _)| *name == field.as_str())
                .and_then(|(_, value)| value.as_integer())
                .and_then(|count| usize::try_from(count).ok())
                .map(Some)
                .ok_or_else(|| Error::InvalidSpec(format!("{}: no count in `{field}`", spec.name))),
        }
    }

    fn write_neighbor(w: &mut Writer<'_>, neighbor: &NeighborLqi) {
        w.writeln(format!("{}: {}", "nwk addr".bold(), neighbor.nwk_addr));
        w.writeln(format!("{}: {}", "ext addr".bold(), neighbor.ext_addr));
        w.writeln(format!("{}: {}", "ext pan id".bold(), neighbor.ext_pan_id));
        w.writeln(format!("{}: {}", "device type".bold(), neighbor.device_type));
        w.writeln(format!(
            "{}: {}",
            "rx on when idle".bold(),
            neighbor.rx_on_when_idle
        ));
        w.writeln(format!("{}: {}", "relationship".bold(), neighbor.relationship));
        w.writeln(format!("{}: {}", "permit join".bold(), neighbor.permit_join));
        w.writeln(format!("{}: {}", "depth".bold(), neighbor.depth));
        w.writeln(format!("{}: {}", "lqi".bold(), neighbor.lqi));
    }
}
