//! Context-free grammars: construction, accessors, and the derived-cache
//! bookkeeping shared by the analyses in [`crate::analysis`].

use std::cell::OnceCell;
use std::collections::{HashMap, HashSet};
use std::fmt;
use std::rc::Rc;

use crate::production::Production;
use crate::symbol::{GrammarSymbol, Terminal, Variable};

/// A context-free grammar `(V, T, S, P)`.
///
/// Grammars are immutable once built: every transformation in this crate
/// takes `&Cfg` and returns a fresh `Cfg`. The `generating`/`nullable`/`cnf`
/// caches are populated lazily and live only as long as this value; they are
/// never mutated in place once set, and a fresh `Cfg` starts with empty
/// caches.
#[derive(Clone)]
pub struct Cfg {
    variables: Vec<Variable>,
    var_index: HashMap<Variable, usize>,
    terminals: Vec<Terminal>,
    term_index: HashMap<Terminal, usize>,
    start: Option<Variable>,
    productions: Vec<Production>,
    production_ranges: HashMap<Variable, (usize, usize)>,

    generating_cache: OnceCell<HashSet<GrammarSymbol>>,
    nullable_cache: OnceCell<HashSet<Variable>>,
    cnf_cache: OnceCell<Rc<Cfg>>,
}

impl Default for Cfg {
    fn default() -> Self {
        Cfg {
            variables: Vec::new(),
            var_index: HashMap::new(),
            terminals: Vec::new(),
            term_index: HashMap::new(),
            start: None,
            productions: Vec::new(),
            production_ranges: HashMap::new(),
            generating_cache: OnceCell::new(),
            nullable_cache: OnceCell::new(),
            cnf_cache: OnceCell::new(),
        }
    }
}

impl Cfg {
    /// Starts building a grammar. See [`CfgBuilder`].
    pub fn builder() -> CfgBuilder {
        CfgBuilder::default()
    }

    /// All variables, in first-seen order.
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    /// All terminals, in first-seen order.
    pub fn terminals(&self) -> &[Terminal] {
        &self.terminals
    }

    /// The start symbol, if one was set.
    pub fn start(&self) -> Option<&Variable> {
        self.start.as_ref()
    }

    /// All productions.
    pub fn productions(&self) -> &[Production] {
        &self.productions
    }

    /// The productions whose head is `head`. Productions sharing a head are
    /// stored contiguously, so this is a plain slice, not a filter.
    pub fn productions_for(&self, head: &Variable) -> &[Production] {
        match self.production_ranges.get(head) {
            Some(&(start, end)) => &self.productions[start..end],
            None => &[],
        }
    }

    /// Whether `sym` is a known variable.
    pub fn has_variable(&self, v: &Variable) -> bool {
        self.var_index.contains_key(v)
    }

    /// Whether `sym` is a known terminal.
    pub fn has_terminal(&self, t: &Terminal) -> bool {
        self.term_index.contains_key(t)
    }

    /// Returns the cached generating set, computing it on first access.
    pub(crate) fn generating_set(&self) -> &HashSet<GrammarSymbol> {
        self.generating_cache
            .get_or_init(|| crate::analysis::sets::generating_symbols(self))
    }

    /// Returns the cached nullable set, computing it on first access.
    pub(crate) fn nullable_set(&self) -> &HashSet<Variable> {
        self.nullable_cache
            .get_or_init(|| crate::analysis::sets::nullable_symbols(self))
    }

    /// Returns the cached CNF form, computing it on first access.
    pub fn to_cnf(&self) -> Rc<Cfg> {
        self.cnf_cache
            .get_or_init(|| Rc::new(crate::cnf::to_cnf(self, &crate::cnf::CfgConfig::default())))
            .clone()
    }

    /// Returns the CNF form computed with a custom configuration. Bypasses
    /// the cache (the cache always holds the default-config result).
    pub fn to_cnf_with(&self, config: &crate::cnf::CfgConfig) -> Cfg {
        crate::cnf::to_cnf(self, config)
    }
}

impl fmt::Debug for Cfg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cfg")
            .field("start", &self.start)
            .field("productions", &self.productions)
            .finish()
    }
}

/// Serializes and deserializes as just `start` and `productions`: every
/// other field (the variable/terminal tables, `production_ranges`, and the
/// lazy analysis caches) is derived from those two by `CfgBuilder::build`,
/// and a `OnceCell` cache has no serialized form to round-trip through
/// anyway.
#[cfg(feature = "serialize")]
#[derive(serde::Serialize, serde::Deserialize)]
struct CfgData {
    start: Option<Variable>,
    productions: Vec<Production>,
}

#[cfg(feature = "serialize")]
impl serde::Serialize for Cfg {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        CfgData {
            start: self.start.clone(),
            productions: self.productions.clone(),
        }
        .serialize(serializer)
    }
}

#[cfg(feature = "serialize")]
impl<'de> serde::Deserialize<'de> for Cfg {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let data = CfgData::deserialize(deserializer)?;
        let mut builder = Cfg::builder();
        if let Some(start) = data.start {
            builder = builder.start(start);
        }
        builder = builder.productions(data.productions);
        Ok(builder.build())
    }
}


/// Builder for [`Cfg`]. Closes `V` and `T` silently over the symbols that
/// appear in added productions, as required by the grammar invariant.
#[derive(Default)]
pub struct CfgBuilder {
    variables: Vec<Variable>,
    var_index: HashMap<Variable, usize>,
    terminals: Vec<Terminal>,
    term_index: HashMap<Terminal, usize>,
    start: Option<Variable>,
    productions: Vec<Production>,
}

impl CfgBuilder {
    /// Sets the start symbol.
    pub fn start(mut self, start: Variable) -> Self {
        self.intern_variable(&start);
        self.start = Some(start);
        self
    }

    /// Adds a production, closing `V`/`T` over its head and body.
    pub fn production(mut self, production: Production) -> Self {
        self.intern_variable(production.head());
        for sym in production.body() {
            match sym {
                GrammarSymbol::Variable(v) => self.intern_variable(v),
                GrammarSymbol::Terminal(t) => self.intern_terminal(t),
                GrammarSymbol::Epsilon => {}
            }
        }
        self.productions.push(production);
        self
    }

    /// Adds several productions.
    pub fn productions(mut self, productions: impl IntoIterator<Item = Production>) -> Self {
        for p in productions {
            self = self.production(p);
        }
        self
    }

    fn intern_variable(&mut self, v: &Variable) {
        if !self.var_index.contains_key(v) {
            self.var_index.insert(v.clone(), self.variables.len());
            self.variables.push(v.clone());
        }
    }

    fn intern_terminal(&mut self, t: &Terminal) {
        if !self.term_index.contains_key(t) {
            self.term_index.insert(t.clone(), self.terminals.len());
            self.terminals.push(t.clone());
        }
    }

    /// Finishes building the grammar. If no start symbol was set, defaults
    /// to the variable `S` (creating it if it was not otherwise used),
    /// matching the textual format's default.
    pub fn build(mut self) -> Cfg {
        if self.start.is_none() {
            let s = Variable::new("S");
            self.intern_variable(&s);
            self.start = Some(s);
        }

        // Group productions by head, preserving each group's relative
        // input order and ordering groups by the head's first appearance,
        // so `production_ranges` can hand back plain contiguous slices.
        let var_rank = &self.var_index;
        let mut order: Vec<usize> = (0..self.productions.len()).collect();
        order.sort_by_key(|&i| var_rank[self.productions[i].head()]);
        let productions: Vec<Production> = order.iter().map(|&i| self.productions[i].clone()).collect();

        let mut production_ranges: HashMap<Variable, (usize, usize)> = HashMap::new();
        let mut i = 0;
        while i < productions.len() {
            let head = productions[i].head().clone();
            let start = i;
            while i < productions.len() && productions[i].head() == &head {
                i += 1;
            }
            production_ranges.insert(head, (start, i));
        }

        Cfg {
            variables: self.variables,
            var_index: self.var_index,
            terminals: self.terminals,
            term_index: self.term_index,
            start: self.start,
            productions,
            production_ranges,
            generating_cache: OnceCell::new(),
            nullable_cache: OnceCell::new(),
            cnf_cache: OnceCell::new(),
        }
    }
}
