use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use std::fmt;

pub type EmployeeId = i64;
pub type RoleId = i64;
pub type ShiftId = i64;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    pub id: RoleId,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Employee {
    pub id: EmployeeId,
    pub name: String,
    /// Roles this employee may be scheduled for.
    #[serde(default)]
    pub roles: BTreeSet<RoleId>,
}

impl Employee {
    pub fn has_role(&self, role_id: RoleId) -> bool {
        self.roles.contains(&role_id)
    }
}

/// A scheduled work block. `start_time < end_time` is not guaranteed by the
/// type; the validator rejects such shifts before they are stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Shift {
    pub id: ShiftId,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
    pub employee_id: EmployeeId,
    pub role_id: RoleId,
}

/// Shift as presented to callers, with the assigned role's name resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftView {
    pub id: ShiftId,
    pub employee_id: EmployeeId,
    pub role_id: RoleId,
    pub role_name: String,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

/// Request to schedule a new shift.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftDraft {
    pub employee_id: EmployeeId,
    pub role_id: RoleId,
    pub date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

/// Request to change an existing shift. The date of a shift is fixed once it
/// has been created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShiftChange {
    pub id: ShiftId,
    pub role_id: RoleId,
    pub start_time: NaiveTime,
    pub end_time: NaiveTime,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmployeeSchedule {
    pub id: EmployeeId,
    pub name: String,
    pub roles: Vec<Role>,
    pub shifts: Vec<ShiftView>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleMembers {
    pub role: Role,
    pub employees: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShiftViolation {
    InvalidRole,
    InvalidTimeRange,
    Overlap,
}

impl fmt::Display for ShiftViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let message = match self {
            Self::InvalidRole => "Invalid Role.",
            Self::InvalidTimeRange => "Invalid Start and End time.",
            Self::Overlap => "Overlap schedule.",
        };
        f.write_str(message)
    }
}

/// Outcome of validating a candidate shift. Violations keep the order in
/// which the rules were checked.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationResult {
    violations: Vec<ShiftViolation>,
}

impl ValidationResult {
    pub fn valid() -> Self {
        Self::default()
    }

    pub fn push(&mut self, violation: ShiftViolation) {
        self.violations.push(violation);
    }

    pub fn is_valid(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn violations(&self) -> &[ShiftViolation] {
        &self.violations
    }

    pub fn errors(&self) -> Vec<String> {
        self.violations.iter().map(ToString::to_string).collect()
    }
}

impl FromIterator<ShiftViolation> for ValidationResult {
    fn from_iter<I: IntoIterator<Item = ShiftViolation>>(iter: I) -> Self {
        Self {
            violations: iter.into_iter().collect(),
        }
    }
}

/// Everything the scheduler persists.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Roster {
    pub roles: Vec<Role>,
    pub employees: Vec<Employee>,
    #[serde(default)]
    pub shifts: Vec<Shift>,
    #[serde(default = "first_shift_id")]
    pub next_shift_id: ShiftId,
}

fn first_shift_id() -> ShiftId {
    1
}

impl Roster {
    pub fn new(roles: Vec<Role>, employees: Vec<Employee>) -> Self {
        Self {
            roles,
            employees,
            shifts: Vec::new(),
            next_shift_id: first_shift_id(),
        }
    }

    /// The roster a fresh installation starts with.
    pub fn seed() -> Self {
        let role = |id, name: &str| Role {
            id,
            name: name.to_string(),
        };
        let employee = |id, name: &str, roles: &[RoleId]| Employee {
            id,
            name: name.to_string(),
            roles: roles.iter().copied().collect(),
        };

        Self::new(
            vec![role(1, "Waiter"), role(2, "Barman"), role(3, "Chef")],
            vec![
                employee(1, "Joe Bloggs", &[1, 2]),
                employee(2, "Ben Arnold", &[3]),
            ],
        )
    }

    pub fn employee(&self, id: EmployeeId) -> Option<&Employee> {
        self.employees.iter().find(|e| e.id == id)
    }

    pub fn role(&self, id: RoleId) -> Option<&Role> {
        self.roles.iter().find(|r| r.id == id)
    }

    pub fn shift(&self, id: ShiftId) -> Option<&Shift> {
        self.shifts.iter().find(|s| s.id == id)
    }

    pub fn members_of(&self, role_id: RoleId) -> impl Iterator<Item = &Employee> {
        self.employees.iter().filter(move |e| e.has_role(role_id))
    }

    /// First shift id held by more than one shift.
    pub fn duplicate_shift_id(&self) -> Option<ShiftId> {
        let mut seen = HashSet::new();
        self.shifts.iter().map(|s| s.id).find(|id| !seen.insert(*id))
    }

    /// Moves `next_shift_id` past every stored shift id. Returns `true` when
    /// it had to move.
    pub fn reconcile_next_shift_id(&mut self) -> bool {
        let floor = self
            .shifts
            .iter()
            .map(|s| s.id.saturating_add(1))
            .max()
            .unwrap_or_else(first_shift_id);
        if self.next_shift_id < floor {
            self.next_shift_id = floor;
            true
        } else {
            false
        }
    }

    pub fn view(&self, shift: &Shift) -> ShiftView {
        ShiftView {
            id: shift.id,
            employee_id: shift.employee_id,
            role_id: shift.role_id,
            role_name: self
                .role(shift.role_id)
                .map(|r| r.name.clone())
                .unwrap_or_else(|| "Unknown".to_string()),
            date: shift.date,
            start_time: shift.start_time,
            end_time: shift.end_time,
        }
    }
}
