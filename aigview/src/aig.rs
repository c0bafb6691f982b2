//! The and-inverter network this crate projects.
//!
//! A network is an ordered collection of objects. The position of an object in
//! the collection is its id: dense, zero-based, assigned at creation and never
//! reused. Creation order is the canonical node ordering, and every projection
//! in this crate preserves it end to end.
//!
//! In the structurally hashed ("strash") form every logic node is a two-input
//! AND whose fanins carry inversion flags, which is enough to express
//! NAND/OR/NOR and friends. Mapped logic networks instead attach a library
//! cell to each node and leave the fanins uninverted. Latches are modelled as
//! a box: a `Bi` feeding the `Latch`, whose value re-enters the combinational
//! logic through a `Bo`.

use std::collections::HashMap;
use std::fmt;
use std::path::Path;

use petgraph::algo::toposort;
use petgraph::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// The structural kind of a network object.
///
/// The discriminant doubles as the row index of the type classification
/// table, so the order here is load-bearing.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[repr(usize)]
pub enum ObjKind {
    /// The constant-one source.
    Const1,
    /// A primary input.
    Pi,
    /// A primary output.
    Po,
    /// A box input, the combinational signal entering a latch.
    Bi,
    /// A box output, the latch value re-entering the logic.
    Bo,
    /// A net. Never created by this crate; classification rejects it.
    Net,
    /// A logic node: a two-input AND in strash form, a mapped cell otherwise.
    Node,
    /// A latch between its `Bi` and `Bo`.
    Latch,
}

impl ObjKind {
    /// Returns true for objects that expose an internal signal as an output.
    #[must_use]
    pub fn is_co(self) -> bool {
        matches!(self, Self::Po | Self::Bi)
    }

    /// Returns true for objects that source a combinational signal.
    #[must_use]
    pub fn is_ci(self) -> bool {
        matches!(self, Self::Const1 | Self::Pi | Self::Bo)
    }
}

/// A fanin reference: the driving object and whether the edge is inverted.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Fanin {
    /// Id of the driving object.
    pub src: usize,
    /// True if the signal is complemented along this edge.
    pub inv: bool,
}

impl Fanin {
    #[must_use]
    pub fn new(src: usize, inv: bool) -> Self {
        Self { src, inv }
    }
}

/// A network object.
#[derive(Clone, Debug, PartialEq)]
pub struct Obj {
    /// Structural kind.
    pub kind: ObjKind,
    /// Ordered fanins. Arity is fixed by the kind and form.
    pub fanins: Vec<Fanin>,
    /// Library cell id, for nodes of a mapped network.
    pub cell: Option<usize>,
    /// True if this node is a barrier buffer.
    pub barbuf: bool,
}

impl Obj {
    #[must_use]
    pub fn new(kind: ObjKind) -> Self {
        Self {
            kind,
            fanins: Vec::new(),
            cell: None,
            barbuf: false,
        }
    }

    #[must_use]
    pub fn with_fanins(kind: ObjKind, fanins: Vec<Fanin>) -> Self {
        Self {
            kind,
            fanins,
            cell: None,
            barbuf: false,
        }
    }

    /// Number of inverted fanins.
    #[must_use]
    pub fn inv_count(&self) -> usize {
        self.fanins.iter().filter(|f| f.inv).count()
    }
}

/// The representation a network is currently in.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum NtkForm {
    /// Structurally hashed: two-input ANDs with inversion-flagged fanins.
    Strash,
    /// A logic network, possibly technology mapped.
    Logic,
    /// A flattened netlist.
    Netlist,
}

impl fmt::Display for NtkForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Strash => write!(f, "structurally hashed"),
            Self::Logic => write!(f, "a logic network"),
            Self::Netlist => write!(f, "a netlist"),
        }
    }
}

/// An and-inverter network.
#[derive(Clone, Debug, PartialEq)]
pub struct Aig {
    objs: Vec<Obj>,
    fanouts: Vec<Vec<usize>>,
    form: NtkForm,
    symbols: HashMap<usize, String>,
}

impl Default for Aig {
    fn default() -> Self {
        Self::new()
    }
}

impl Aig {
    /// Create an empty strash network. The constant-one source is object 0.
    #[must_use]
    pub fn new() -> Self {
        let mut aig = Self::empty(NtkForm::Strash);
        let const1 = aig.push(Obj::new(ObjKind::Const1));
        assert_eq!(const1, 0);
        aig
    }

    /// Create an empty logic network, ready to take mapped nodes.
    #[must_use]
    pub fn new_logic() -> Self {
        let mut aig = Self::empty(NtkForm::Logic);
        let const1 = aig.push(Obj::new(ObjKind::Const1));
        assert_eq!(const1, 0);
        aig
    }

    /// Create an empty netlist-form network.
    #[must_use]
    pub fn new_netlist() -> Self {
        let mut aig = Self::empty(NtkForm::Netlist);
        let const1 = aig.push(Obj::new(ObjKind::Const1));
        assert_eq!(const1, 0);
        aig
    }

    fn empty(form: NtkForm) -> Self {
        Self {
            objs: Vec::new(),
            fanouts: Vec::new(),
            form,
            symbols: HashMap::new(),
        }
    }

    /// Rebuild a network from parts, recomputing the fanout lists.
    fn from_parts(form: NtkForm, objs: Vec<Obj>, symbols: HashMap<usize, String>) -> Self {
        let mut fanouts = vec![Vec::new(); objs.len()];
        for (id, obj) in objs.iter().enumerate() {
            for fanin in &obj.fanins {
                fanouts[fanin.src].push(id);
            }
        }
        Self {
            objs,
            fanouts,
            form,
            symbols,
        }
    }

    /// Append an object, wiring it into the fanout lists of its fanins.
    pub(crate) fn push(&mut self, obj: Obj) -> usize {
        let id = self.objs.len();
        for fanin in &obj.fanins {
            assert!(
                fanin.src < id,
                "fanin {} references an object that does not exist yet",
                fanin.src
            );
        }
        self.fanouts.push(Vec::new());
        for fanin in &obj.fanins {
            self.fanouts[fanin.src].push(id);
        }
        self.objs.push(obj);
        id
    }

    /// Rewire an object's fanins, fixing up the fanout lists.
    ///
    /// Unlike [`push`](Self::push) this tolerates forward references, which
    /// the latch box needs: a `Bo` is created before the `Latch` that drives
    /// it.
    pub(crate) fn set_fanins(&mut self, id: usize, fanins: Vec<Fanin>) {
        let old = std::mem::take(&mut self.objs[id].fanins);
        for fanin in old {
            self.fanouts[fanin.src].retain(|&consumer| consumer != id);
        }
        for fanin in &fanins {
            self.fanouts[fanin.src].push(id);
        }
        self.objs[id].fanins = fanins;
    }

    /// Append a primary input.
    pub fn add_pi(&mut self) -> usize {
        self.push(Obj::new(ObjKind::Pi))
    }

    /// Append a two-input AND node. Strash networks only.
    pub fn add_and(&mut self, src0: usize, inv0: bool, src1: usize, inv1: bool) -> usize {
        assert_eq!(self.form, NtkForm::Strash, "and gates belong to strash networks");
        self.push(Obj::with_fanins(
            ObjKind::Node,
            vec![Fanin::new(src0, inv0), Fanin::new(src1, inv1)],
        ))
    }

    /// Append a primary output fed by `src`.
    pub fn add_po(&mut self, src: usize, inv: bool) -> usize {
        self.push(Obj::with_fanins(ObjKind::Po, vec![Fanin::new(src, inv)]))
    }

    /// Append a latch box fed by `src`, returning the id of its `Bo`.
    pub fn add_latch(&mut self, src: usize, inv: bool) -> usize {
        let bi = self.push(Obj::with_fanins(ObjKind::Bi, vec![Fanin::new(src, inv)]));
        let latch = self.push(Obj::with_fanins(ObjKind::Latch, vec![Fanin::new(bi, false)]));
        self.push(Obj::with_fanins(ObjKind::Bo, vec![Fanin::new(latch, false)]))
    }

    /// Append a mapped node implementing `cell` over `srcs`. Logic networks only.
    pub fn add_mapped_node(&mut self, srcs: &[usize], cell: usize) -> usize {
        assert_eq!(self.form, NtkForm::Logic, "mapped nodes belong to logic networks");
        let fanins = srcs.iter().map(|&src| Fanin::new(src, false)).collect();
        let mut obj = Obj::with_fanins(ObjKind::Node, fanins);
        obj.cell = Some(cell);
        self.push(obj)
    }

    /// Append a barrier buffer passing `src` through. Logic networks only.
    pub fn add_barbuf(&mut self, src: usize, cell: usize) -> usize {
        assert_eq!(self.form, NtkForm::Logic, "barrier buffers belong to logic networks");
        let mut obj = Obj::with_fanins(ObjKind::Node, vec![Fanin::new(src, false)]);
        obj.cell = Some(cell);
        obj.barbuf = true;
        self.push(obj)
    }

    /// Read a network from an AIGER file, producing the strash form.
    ///
    /// Object creation order: constant, primary inputs, latch `Bo`s, AND
    /// nodes in file order, primary outputs, then the `Bi`/`Latch` pairs.
    pub fn from_aiger<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = std::fs::File::open(path)?;
        let reader = aiger::Reader::from_reader(file)
            .map_err(|e| Error::InvalidAiger(format!("{e:?}")))?;
        let header = reader.header();

        let mut inputs = Vec::with_capacity(header.i);
        let mut latches = Vec::with_capacity(header.l);
        let mut outputs = Vec::with_capacity(header.o);
        let mut ands = Vec::with_capacity(header.a);
        let mut symbols = Vec::new();

        for record in reader.records() {
            match record.map_err(|e| Error::InvalidAiger(format!("{e:?}")))? {
                aiger::Aiger::Input(l) => inputs.push(l),
                aiger::Aiger::Latch { output, input } => latches.push((output, input)),
                aiger::Aiger::Output(l) => outputs.push(l),
                aiger::Aiger::AndGate { output, inputs } => ands.push((output, inputs)),
                aiger::Aiger::Symbol {
                    type_spec,
                    position,
                    symbol,
                } => symbols.push((type_spec, position, symbol)),
            }
        }

        let mut aig = Self::new();
        // Variable 0 is the constant; the rest are filled in as records land.
        let mut var2obj = vec![usize::MAX; header.m + 1];
        var2obj[0] = 0;

        let resolve = |var2obj: &[usize], l: aiger::Literal| -> Result<Fanin> {
            let src = var2obj[l.variable()];
            if src == usize::MAX {
                return Err(Error::InvalidAiger(format!(
                    "literal {} refers to an undefined variable",
                    l.0
                )));
            }
            Ok(Fanin::new(src, l.is_inverted()))
        };

        let mut pi_ids = Vec::with_capacity(inputs.len());
        for l in &inputs {
            let pi = aig.add_pi();
            var2obj[l.variable()] = pi;
            pi_ids.push(pi);
        }

        let mut bo_ids = Vec::with_capacity(latches.len());
        for (output, _) in &latches {
            let bo = aig.push(Obj::new(ObjKind::Bo));
            var2obj[output.variable()] = bo;
            bo_ids.push(bo);
        }

        for (output, fanins) in &ands {
            let f0 = resolve(&var2obj, fanins[0])?;
            let f1 = resolve(&var2obj, fanins[1])?;
            let node = aig.push(Obj::with_fanins(ObjKind::Node, vec![f0, f1]));
            var2obj[output.variable()] = node;
        }

        let mut po_ids = Vec::with_capacity(outputs.len());
        for l in &outputs {
            let fanin = resolve(&var2obj, *l)?;
            po_ids.push(aig.add_po(fanin.src, fanin.inv));
        }

        for (&bo, (_, input)) in bo_ids.iter().zip(&latches) {
            let fanin = resolve(&var2obj, *input)?;
            let bi = aig.push(Obj::with_fanins(ObjKind::Bi, vec![fanin]));
            let latch = aig.push(Obj::with_fanins(ObjKind::Latch, vec![Fanin::new(bi, false)]));
            aig.set_fanins(bo, vec![Fanin::new(latch, false)]);
        }

        for (type_spec, position, symbol) in symbols {
            let id = match type_spec {
                aiger::Symbol::Input => pi_ids.get(position),
                aiger::Symbol::Output => po_ids.get(position),
                aiger::Symbol::Latch => bo_ids.get(position),
            };
            if let Some(&id) = id {
                aig.symbols.insert(id, symbol);
            }
        }

        Ok(aig)
    }

    /// The representation this network is in.
    #[must_use]
    pub fn form(&self) -> NtkForm {
        self.form
    }

    #[must_use]
    pub fn is_strash(&self) -> bool {
        self.form == NtkForm::Strash
    }

    #[must_use]
    pub fn is_logic(&self) -> bool {
        self.form == NtkForm::Logic
    }

    #[must_use]
    pub fn is_netlist(&self) -> bool {
        self.form == NtkForm::Netlist
    }

    /// True if this is a logic network with a cell on every node.
    #[must_use]
    pub fn has_mapping(&self) -> bool {
        self.form == NtkForm::Logic
            && self
                .objs
                .iter()
                .filter(|obj| obj.kind == ObjKind::Node)
                .all(|obj| obj.cell.is_some())
    }

    #[must_use]
    pub fn obj(&self, id: usize) -> &Obj {
        &self.objs[id]
    }

    /// Iterate over all objects in creation order.
    pub fn objects(&self) -> impl Iterator<Item = (usize, &Obj)> {
        self.objs.iter().enumerate()
    }

    /// Total object count, every kind included.
    #[must_use]
    pub fn object_count(&self) -> usize {
        self.objs.len()
    }

    fn count_kind(&self, kind: ObjKind) -> usize {
        self.objs.iter().filter(|obj| obj.kind == kind).count()
    }

    #[must_use]
    pub fn pi_count(&self) -> usize {
        self.count_kind(ObjKind::Pi)
    }

    #[must_use]
    pub fn po_count(&self) -> usize {
        self.count_kind(ObjKind::Po)
    }

    #[must_use]
    pub fn latch_count(&self) -> usize {
        self.count_kind(ObjKind::Latch)
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.count_kind(ObjKind::Node)
    }

    /// Summed fanin count over logic nodes.
    #[must_use]
    pub fn total_fanins(&self) -> usize {
        self.objs
            .iter()
            .filter(|obj| obj.kind == ObjKind::Node)
            .map(|obj| obj.fanins.len())
            .sum()
    }

    /// Number of barrier buffers in the network.
    #[must_use]
    pub fn bar_buf_count(&self) -> usize {
        self.objs.iter().filter(|obj| obj.barbuf).count()
    }

    /// The first consumer of an object's output, if it has any.
    #[must_use]
    pub fn fanout0(&self, id: usize) -> Option<usize> {
        self.fanouts[id].first().copied()
    }

    /// All consumers of an object's output.
    #[must_use]
    pub fn fanouts(&self, id: usize) -> &[usize] {
        &self.fanouts[id]
    }

    #[must_use]
    pub fn symbol(&self, id: usize) -> Option<&str> {
        self.symbols.get(&id).map(String::as_str)
    }

    pub fn set_symbol(&mut self, id: usize, name: impl Into<String>) {
        self.symbols.insert(id, name.into());
    }

    /// Logic depth of a strash network, counted in AND levels.
    #[must_use]
    pub fn aig_level(&self) -> usize {
        fn walk(objs: &[Obj], memo: &mut [Option<usize>], id: usize) -> usize {
            if let Some(level) = memo[id] {
                return level;
            }
            let level = match objs[id].kind {
                ObjKind::Node => {
                    1 + objs[id]
                        .fanins
                        .iter()
                        .map(|fanin| walk(objs, memo, fanin.src))
                        .max()
                        .unwrap_or(0)
                }
                // Sequential boundary: a Bo is a source for this walk.
                _ => 0,
            };
            memo[id] = Some(level);
            level
        }

        let mut memo = vec![None; self.objs.len()];
        let mut depth = 0;
        for (id, obj) in self.objects() {
            if obj.kind == ObjKind::Node {
                depth = depth.max(walk(&self.objs, &mut memo, id));
            }
        }
        depth
    }

    /// Logic depth of a general logic network.
    ///
    /// Kept separate from [`aig_level`](Self::aig_level): mapped nodes have
    /// arbitrary arity and the walk is driven from the combinational outputs.
    #[must_use]
    pub fn ntk_level(&self) -> usize {
        let mut memo: Vec<Option<usize>> = vec![None; self.objs.len()];
        let mut depth = 0;

        for (id, obj) in self.objects() {
            if !obj.kind.is_co() {
                continue;
            }
            let mut stack = vec![id];
            while let Some(&top) = stack.last() {
                if memo[top].is_some() {
                    stack.pop();
                    continue;
                }
                let obj = &self.objs[top];
                let recurse = obj.kind == ObjKind::Node || obj.kind.is_co();
                if !recurse {
                    memo[top] = Some(0);
                    stack.pop();
                    continue;
                }
                let pending: Vec<usize> = obj
                    .fanins
                    .iter()
                    .map(|fanin| fanin.src)
                    .filter(|&src| memo[src].is_none())
                    .collect();
                if pending.is_empty() {
                    let inner = obj
                        .fanins
                        .iter()
                        .map(|fanin| memo[fanin.src].unwrap_or(0))
                        .max()
                        .unwrap_or(0);
                    let level = if obj.kind == ObjKind::Node { inner + 1 } else { inner };
                    memo[top] = Some(level);
                    stack.pop();
                } else {
                    stack.extend(pending);
                }
            }
            depth = depth.max(memo[id].unwrap_or(0));
        }
        depth
    }

    /// A topological ordering of the combinational graph.
    ///
    /// `Bo` fanins are sequential boundaries and contribute no ordering
    /// constraint.
    fn topo_order(&self) -> Result<Vec<usize>> {
        let mut graph: Graph<(), ()> = Graph::with_capacity(self.objs.len(), self.objs.len());
        for _ in 0..self.objs.len() {
            graph.add_node(());
        }
        for (id, obj) in self.objects() {
            if obj.kind == ObjKind::Bo {
                continue;
            }
            for fanin in &obj.fanins {
                graph.add_edge(NodeIndex::new(fanin.src), NodeIndex::new(id), ());
            }
        }
        match toposort(&graph, None) {
            Ok(order) => Ok(order.into_iter().map(NodeIndex::index).collect()),
            Err(cycle) => Err(Error::TopoSortFailure {
                id: cycle.node_id().index(),
            }),
        }
    }

    /// Duplicate the network with objects renumbered into topological order.
    pub fn dup_topo(&self) -> Result<Self> {
        let order = self.topo_order()?;
        Ok(self.dup_in_order(&order, false))
    }

    /// Duplicate the network in topological order, splicing out barrier
    /// buffers.
    ///
    /// Consumers of a removed buffer are rewired straight to its source.
    /// Only meaningful once the network is already topologically ordered,
    /// hence the two-stage duplication in the mapping statistics.
    pub fn dup_topo_no_barbufs(&self) -> Result<Self> {
        let order = self.topo_order()?;
        Ok(self.dup_in_order(&order, true))
    }

    fn dup_in_order(&self, order: &[usize], skip_barbufs: bool) -> Self {
        let mut map = vec![usize::MAX; self.objs.len()];
        let mut next = 0;
        for &id in order {
            let obj = &self.objs[id];
            if skip_barbufs && obj.barbuf {
                // The buffer's source precedes it in topological order, so
                // its new id is already known; chains collapse transitively.
                map[id] = map[obj.fanins[0].src];
            } else {
                map[id] = next;
                next += 1;
            }
        }

        let mut objs = Vec::with_capacity(next);
        let mut symbols = HashMap::new();
        for &id in order {
            let obj = &self.objs[id];
            if skip_barbufs && obj.barbuf {
                continue;
            }
            let mut copy = obj.clone();
            for fanin in &mut copy.fanins {
                fanin.src = map[fanin.src];
            }
            if let Some(name) = self.symbols.get(&id) {
                symbols.insert(map[id], name.clone());
            }
            objs.push(copy);
        }

        Self::from_parts(self.form, objs, symbols)
    }
}
