// File: crates/curve-core/src/hierarchy.rs
// Summary: Parent/child grouping of series, focus tracking and the visual state of every curve.
// Notes:
// - Curves live in a flat arena in build order: children first, then roots.
// - Parent/child links are names resolved through the index, never references.

use std::collections::HashMap;

use log::{debug, warn};

use crate::error::{ChartError, Result};
use crate::series::Series;
use crate::style::VisualState;

/// Position of a curve in the chart's arena.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CurveId(pub usize);

#[derive(Clone, Debug, PartialEq)]
pub struct Member {
    pub name: String,
    pub parent_name: Option<String>,
    /// Names of the children attached when this root was built.
    pub children: Vec<String>,
    pub is_default: bool,
    /// Index of the series in the caller's input list.
    pub source_index: usize,
}

impl Member {
    pub fn is_root(&self) -> bool {
        self.parent_name.is_none()
    }
}

#[derive(Clone, Debug)]
pub struct Hierarchy {
    members: Vec<Member>,
    index: HashMap<String, CurveId>,
    focused: CurveId,
}

impl Hierarchy {
    /// Group `series` in two passes: every child first, then every root with
    /// the already-built children that name it as parent.
    pub fn build(series: &[Series]) -> Result<Self> {
        if series.is_empty() {
            return Err(ChartError::invalid("a chart needs at least one series"));
        }

        let mut members: Vec<Member> = Vec::with_capacity(series.len());
        let mut index: HashMap<String, CurveId> = HashMap::with_capacity(series.len());
        let mut push = |members: &mut Vec<Member>, member: Member| -> Result<()> {
            if index.contains_key(&member.name) {
                return Err(ChartError::invalid(format!("duplicate series name `{}`", member.name)));
            }
            index.insert(member.name.clone(), CurveId(members.len()));
            members.push(member);
            Ok(())
        };

        for (i, s) in series.iter().enumerate().filter(|(_, s)| !s.is_root()) {
            push(&mut members, Member {
                name: s.name.clone(),
                parent_name: s.parent_name.clone(),
                children: Vec::new(),
                is_default: s.is_default,
                source_index: i,
            })?;
        }

        for (i, s) in series.iter().enumerate().filter(|(_, s)| s.is_root()) {
            let children = members
                .iter()
                .filter(|m| m.parent_name.as_deref() == Some(s.name.as_str()))
                .map(|m| m.name.clone())
                .collect();
            push(&mut members, Member {
                name: s.name.clone(),
                parent_name: None,
                children,
                is_default: s.is_default,
                source_index: i,
            })?;
        }

        let focused = initial_focus(&members);
        debug!(
            "hierarchy built: {} curves, initial focus `{}`",
            members.len(),
            members[focused.0].name
        );
        Ok(Self { members, index, focused })
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn member(&self, id: CurveId) -> Option<&Member> {
        self.members.get(id.0)
    }

    pub fn id_of(&self, name: &str) -> Option<CurveId> {
        self.index.get(name).copied()
    }

    /// The root this curve is grouped under, if it exists.
    pub fn parent_of(&self, id: CurveId) -> Option<CurveId> {
        let parent = self.member(id)?.parent_name.as_deref()?;
        self.id_of(parent).filter(|p| self.members[p.0].is_root())
    }

    pub fn children_of(&self, id: CurveId) -> Vec<CurveId> {
        self.member(id)
            .map(|m| m.children.iter().filter_map(|name| self.id_of(name)).collect())
            .unwrap_or_default()
    }

    pub fn focused(&self) -> CurveId {
        self.focused
    }

    /// State of `id` given the current focus:
    /// the focused curve is current, roots and orphans stay in view, and
    /// children are in view only while their parent is focused.
    pub fn state_of(&self, id: CurveId) -> VisualState {
        if id == self.focused {
            return VisualState::Current;
        }
        match self.parent_of(id) {
            None => VisualState::InView,
            Some(parent) if parent == self.focused => VisualState::InView,
            Some(_) => VisualState::Hidden,
        }
    }

    /// States of all curves, indexed by `CurveId`.
    pub fn states(&self) -> Vec<VisualState> {
        (0..self.members.len()).map(|i| self.state_of(CurveId(i))).collect()
    }

    /// Move focus to `id` and return the resulting states.
    pub fn focus(&mut self, id: CurveId) -> Result<Vec<VisualState>> {
        if id.0 >= self.members.len() {
            return Err(ChartError::invalid(format!("no curve with id {}", id.0)));
        }
        if id != self.focused {
            debug!("focus `{}` -> `{}`", self.members[self.focused.0].name, self.members[id.0].name);
        }
        self.focused = id;
        Ok(self.states())
    }
}

fn initial_focus(members: &[Member]) -> CurveId {
    if let Some(i) = members.iter().position(|m| m.is_default) {
        return CurveId(i);
    }
    let fallback = members.iter().position(Member::is_root).unwrap_or(0);
    warn!("no series is flagged as default; focusing `{}`", members[fallback].name);
    CurveId(fallback)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn s(name: &str) -> Series {
        Series::new(name, vec![("a", 1.0).into(), ("b", 2.0).into()])
    }

    #[test]
    fn children_are_built_before_roots() {
        let h = Hierarchy::build(&[s("root"), s("kid").with_parent("root"), s("other")]).unwrap();
        let names: Vec<_> = h.members().iter().map(|m| m.name.as_str()).collect();
        assert_eq!(names, ["kid", "root", "other"]);
        assert_eq!(h.members()[1].children, vec!["kid".to_string()]);
        assert_eq!(h.members()[1].source_index, 0);
        let root = h.id_of("root").unwrap();
        assert_eq!(h.children_of(root), vec![h.id_of("kid").unwrap()]);
        assert_eq!(h.parent_of(h.id_of("kid").unwrap()), Some(root));
    }

    #[test]
    fn duplicate_names_are_rejected() {
        assert!(matches!(Hierarchy::build(&[s("a"), s("a")]), Err(ChartError::InvalidInput(_))));
        assert!(Hierarchy::build(&[]).is_err());
    }

    #[test]
    fn fallback_focus_is_first_root() {
        let h = Hierarchy::build(&[s("kid").with_parent("root"), s("root"), s("b")]).unwrap();
        assert_eq!(h.focused(), h.id_of("root").unwrap());
    }

    #[test]
    fn default_flag_wins() {
        let h = Hierarchy::build(&[s("a"), s("b").as_default()]).unwrap();
        assert_eq!(h.focused(), h.id_of("b").unwrap());
        assert_eq!(h.state_of(h.id_of("a").unwrap()), VisualState::InView);
    }

    #[test]
    fn sibling_children_hide_when_one_is_focused() {
        let mut h = Hierarchy::build(&[
            s("root").as_default(),
            s("k1").with_parent("root"),
            s("k2").with_parent("root"),
            s("orphan").with_parent("missing"),
        ])
        .unwrap();
        let k1 = h.id_of("k1").unwrap();
        let k2 = h.id_of("k2").unwrap();
        let orphan = h.id_of("orphan").unwrap();
        assert_eq!(h.state_of(k1), VisualState::InView);

        h.focus(k1).unwrap();
        assert_eq!(h.state_of(k1), VisualState::Current);
        assert_eq!(h.state_of(k2), VisualState::Hidden);
        assert_eq!(h.state_of(h.id_of("root").unwrap()), VisualState::InView);
        assert_eq!(h.state_of(orphan), VisualState::InView);
        assert!(h.focus(CurveId(99)).is_err());
    }
}
