use std::collections::BTreeMap;

/// Convenience methods for lexical analysis of conversion definitions.
/// - For splitting a pipeline into steps
/// - For splitting a step into parameters (i.e. key=value-pairs)
/// - For syntactical normalization by eliminating non-significant whitespace
/// - For checking whether a given definition is singular or a pipeline
/// - For checking whether a name refers to a macro ("resource name"), and
/// - For accessing the name of a given operator.
pub trait Tokenize {
    /// Split a pipeline definition into steps, dropping comments and empty steps
    fn split_into_steps(&self) -> Vec<String>;

    /// Split a step into parameters. Give special treatment to names and flags:
    /// ```txt
    /// 'gcj02 inv ellps=krass' -> ('name=gcj02', 'inv=true', 'ellps=krass')
    /// ```
    fn split_into_parameters(&self) -> BTreeMap<String, String>;

    /// Glue syntactical elements together, and separate them from each other
    /// by a single space:
    /// ```txt
    /// bd09   inv |  gcj02 ellps = krass  ->  bd09 inv|gcj02 ellps=krass
    /// ```
    fn normalize(&self) -> String;

    fn is_pipeline(&self) -> bool;
    fn is_resource_name(&self) -> bool;
    fn operator_name(&self, default: &str) -> String;
}

/// Tokenize implementation for string-like objects
impl<T> Tokenize for T
where
    T: AsRef<str>,
{
    fn split_into_steps(&self) -> Vec<String> {
        // Remove comments, both inline and full line
        let mut trimmed = String::new();
        for line in self.as_ref().lines() {
            let line = line.split('#').next().unwrap_or_default();
            trimmed += " ";
            trimmed += line.trim();
        }

        trimmed
            .normalize()
            .split('|')
            .filter(|x| !x.is_empty())
            .map(|x| x.to_string())
            .collect()
    }

    fn split_into_parameters(&self) -> BTreeMap<String, String> {
        let step = self.normalize();
        let mut params = BTreeMap::new();
        for element in step.split_whitespace() {
            // Flags are booleans that are true when specified, false when not
            let (key, value) = element.split_once('=').unwrap_or((element, "true"));

            // If the first arg is a key-without-value, it is the name of the operator
            if params.is_empty() && !element.contains('=') {
                params.insert(String::from("name"), String::from(key));
                continue;
            }

            params.insert(String::from(key), String::from(value));
        }

        params
    }

    fn normalize(&self) -> String {
        let elements: Vec<_> = self.as_ref().split_whitespace().collect();
        elements
            .join(" ")
            .replace("= ", "=")
            .replace(": ", ":")
            .replace(", ", ",")
            .replace("| ", "|")
            .replace(" =", "=")
            .replace(" :", ":")
            .replace(" ,", ",")
            .replace(" |", "|")
    }

    fn is_pipeline(&self) -> bool {
        self.as_ref().contains('|')
    }

    fn is_resource_name(&self) -> bool {
        self.operator_name("").contains(':')
    }

    fn operator_name(&self, default: &str) -> String {
        if self.is_pipeline() {
            return default.to_string();
        }
        self.split_into_parameters()
            .get("name")
            .map_or_else(|| default.to_string(), |name| name.to_string())
    }
}

// ----- T E S T S ---------------------------------------------------------------------
