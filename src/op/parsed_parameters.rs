use super::*;

#[derive(Debug)]
pub struct ParsedParameters {
    pub name: String,

    // The reference ellipsoid has a hard-coded slot
    pub ellps: Ellipsoid,

    // Op-specific options are stored in B-Trees
    pub boolean: BTreeSet<&'static str>,
    pub real: BTreeMap<&'static str, f64>,
    pub text: BTreeMap<&'static str, String>,
    pub ignored: Vec<String>,
    pub given: BTreeMap<String, String>,
}

// Accessors
impl ParsedParameters {
    pub fn boolean(&self, key: &str) -> bool {
        self.boolean.contains(key)
    }
    pub fn real(&self, key: &str) -> Result<f64, Error> {
        if let Some(value) = self.real.get(key) {
            return Ok(*value);
        }
        Err(Error::MissingParam(key.to_string()))
    }
    pub fn text(&self, key: &str) -> Result<String, Error> {
        if let Some(value) = self.text.get(key) {
            return Ok(value.to_string());
        }
        Err(Error::MissingParam(key.to_string()))
    }
    pub fn ignored(&self) -> Vec<String> {
        self.ignored.clone()
    }
    pub fn ellps(&self) -> &Ellipsoid {
        &self.ellps
    }
}

impl ParsedParameters {
    pub fn new(
        parameters: &RawParameters,
        gamut: &[OpParameter],
    ) -> Result<ParsedParameters, Error> {
        let locals = parameters.definition.split_into_parameters();
        let globals = &parameters.globals;
        let mut boolean = BTreeSet::<&'static str>::new();
        let mut real = BTreeMap::<&'static str, f64>::new();
        let mut text = BTreeMap::<&'static str, String>::new();

        // Try to locate all accepted parameters, type check, and place them into
        // their proper bins
        for p in gamut {
            match *p {
                OpParameter::Flag { key } => {
                    if let Some(value) = chase(globals, &locals, key)? {
                        if value.is_empty() || value.to_lowercase() == "true" {
                            boolean.insert(key);
                            continue;
                        }
                        warn!("Cannot parse {key}:{value} as a boolean constant!");
                        return Err(Error::BadParam(key.to_string(), value));
                    }
                    // If we're here, the key was not found, and we're done, since
                    // flags are always optional (i.e. implicitly false when not given)
                    continue;
                }

                OpParameter::Real { key, default } => {
                    if let Some(value) = chase(globals, &locals, key)? {
                        if let Ok(v) = value.parse::<f64>() {
                            real.insert(key, v);
                            continue;
                        }
                        warn!("Cannot parse {key}:{value} as a real number");
                        return Err(Error::BadParam(key.to_string(), value));
                    }

                    // Key not found - default given?
                    if let Some(value) = default {
                        real.insert(key, value);
                        continue;
                    }

                    error!("Missing required parameter '{key}'");
                    return Err(Error::MissingParam(key.to_string()));
                }

                OpParameter::Text { key, default } => {
                    if let Some(value) = chase(globals, &locals, key)? {
                        text.insert(key, value);
                        continue;
                    }

                    // Key not found - default given?
                    if let Some(value) = default {
                        text.insert(key, value.to_string());
                        continue;
                    }

                    error!("Missing required parameter '{key}'");
                    return Err(Error::MissingParam(key.to_string()));
                }
            };
        }

        // Now handle the ellipsoid slot. Operators without an `ellps`
        // parameter in their gamut get the default
        let ellps = match text.get("ellps") {
            Some(e) => Ellipsoid::named(e)?,
            None => Ellipsoid::default(),
        };

        let name = locals
            .get("name")
            .map_or_else(|| "unknown".to_string(), |n| n.to_string());

        // Params specified, but not in the gamut
        let given = locals.clone();
        let ignored: Vec<String> = locals
            .into_keys()
            .filter(|k| k != "name" && !gamut.iter().any(|p| key_of(p) == k))
            .collect();
        if !ignored.is_empty() {
            debug!("{name}: ignoring parameters {ignored:?}");
        }

        Ok(ParsedParameters {
            name,
            ellps,
            boolean,
            real,
            text,
            ignored,
            given,
        })
    }
}

// ----- A N C I L L A R Y   F U N C T I O N S -----------------------------------------

fn key_of(parameter: &OpParameter) -> &'static str {
    match *parameter {
        OpParameter::Flag { key } => key,
        OpParameter::Real { key, .. } => key,
        OpParameter::Text { key, .. } => key,
    }
}

/// Look up `key`, first among the `locals`, then among the `globals`.
/// A value of the form `^other` continues the search using the key
/// `other`, while a value of the form `*value` provides a default, used
/// only if no proper value is found further up the chain.
pub fn chase(
    globals: &BTreeMap<String, String>,
    locals: &BTreeMap<String, String>,
    key: &str,
) -> Result<Option<String>, Error> {
    // The haystack is a reverse iterator over both lists in series
    let mut haystack = globals.iter().chain(locals.iter()).rev();

    let key = key.trim();
    if key.is_empty() {
        return Err(Error::Syntax(String::from("Empty key")));
    }

    let mut default = "";
    let mut needle = key;
    let mut chasing = false;

    loop {
        let Some((_, found)) = haystack.find(|&x| x.0 == needle) else {
            if !default.is_empty() {
                return Ok(Some(String::from(default)));
            }
            if chasing {
                return Err(Error::Syntax(format!("Incomplete definition for '{key}'")));
            }
            return Ok(None);
        };
        let value = found.trim();

        // A(nother) lookup: continue the search in the same iterator,
        // now using a *new search key*, as specified by the current value
        if let Some(stripped) = value.strip_prefix('^') {
            chasing = true;
            needle = stripped;
            continue;
        }

        // A provided default: continue the search using the *same key*,
        // in case a proper value is provided.
        if let Some(stripped) = value.strip_prefix('*') {
            chasing = true;
            needle = key;
            default = stripped;
            continue;
        }

        return Ok(Some(String::from(value)));
    }
}

// ----- T E S T S ------------------------------------------------------------------
