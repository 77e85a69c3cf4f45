//! Interactive field entry

use std::io::{self, BufRead, Write};

use chiptan_protocol::TransactionFields;

/// Owned transaction fields, as typed or passed on the command line
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OwnedFields {
    pub startcode: String,
    pub de1: String,
    pub de2: String,
    pub de3: String,
}

impl OwnedFields {
    pub fn as_fields(&self) -> TransactionFields<'_> {
        TransactionFields::new(&self.startcode, &self.de1, &self.de2, &self.de3)
    }
}

/// Ask for the start code and the three data elements
///
/// The start code is asked for again until it is non-empty. Data elements
/// may be left empty.
pub fn prompt_fields<R: BufRead, W: Write>(input: &mut R, output: &mut W) -> io::Result<OwnedFields> {
    let startcode = loop {
        let line = prompt(input, output, "Start code: ")?;
        if !line.is_empty() {
            break line;
        }
    };

    Ok(OwnedFields {
        startcode,
        de1: prompt(input, output, "DE1: ")?,
        de2: prompt(input, output, "DE2: ")?,
        de3: prompt(input, output, "DE3: ")?,
    })
}

/// Print `label` and read one line without its line ending
fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, label: &str) -> io::Result<String> {
    write!(output, "{label}")?;
    output.flush()?;

    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Err(io::Error::new(
            io::ErrorKind::UnexpectedEof,
            "input closed while reading transaction fields",
        ));
    }

    let trimmed = line.trim_end_matches(['\r', '\n']).len();
    line.truncate(trimmed);
    Ok(line)
}
