//! Master-data operations on the [`Registry`].

use serde::Deserialize;
use tracing::debug;

use crate::calculation::{VendorOptions, vendor_options};
use crate::error::{EngineError, EngineResult};
use crate::models::{Approver, BillingCycleRule, Designation, Employee, Location, Vendor};
use crate::session::hash_password;

use super::{Registry, Tables};

/// A new approver with a plaintext password.
#[derive(Debug, Clone, Deserialize)]
pub struct NewApprover {
    /// The approver's employee ID.
    pub emp_id: String,
    /// The approver's name.
    pub name: String,
    /// The approver's email address.
    pub email: String,
    /// Plaintext password; only its salted hash is kept.
    pub password: String,
    /// The approver's manager's employee ID.
    #[serde(default)]
    pub manager_emp_id: Option<String>,
    /// The approver's manager's name.
    #[serde(default)]
    pub manager_name: Option<String>,
    /// The approver's manager's email address.
    #[serde(default)]
    pub manager_email: Option<String>,
}

/// Changes to an existing approver. An absent password keeps the current one.
#[derive(Debug, Clone, Deserialize)]
pub struct ApproverUpdate {
    /// The approver's name.
    pub name: String,
    /// The approver's email address.
    pub email: String,
    /// New plaintext password.
    #[serde(default)]
    pub password: Option<String>,
    /// The approver's manager's employee ID.
    #[serde(default)]
    pub manager_emp_id: Option<String>,
    /// The approver's manager's name.
    #[serde(default)]
    pub manager_name: Option<String>,
    /// The approver's manager's email address.
    #[serde(default)]
    pub manager_email: Option<String>,
}

/// A new or replacement designation; the ID is assigned by the registry.
#[derive(Debug, Clone, Deserialize)]
pub struct NewDesignation {
    /// The designation title.
    pub designation: String,
    /// The vendor the designation belongs to.
    pub vendor_name: String,
}

fn optional(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn in_use(entity: &'static str, key: &str, count: usize, what: &str) -> EngineResult<()> {
    if count > 0 {
        return Err(EngineError::InUse {
            entity,
            key: key.to_string(),
            referenced_by: format!("{} {}(s)", count, what),
        });
    }
    Ok(())
}

impl Tables {
    /// Checks every reference an employee holds.
    fn check_employee_references(&self, employee: &Employee) -> EngineResult<()> {
        let missing = |field: &str, value: &str| {
            EngineError::invalid_field("employee", field, format!("unknown {} '{}'", field, value))
        };

        if !self.locations.contains_key(&employee.location) {
            return Err(missing("location", &employee.location));
        }
        if !self.vendors.contains_key(&employee.vendor_name) {
            return Err(missing("vendor_name", &employee.vendor_name));
        }
        if !self.approvers.contains_key(&employee.approver_emp_id) {
            return Err(missing("approver_emp_id", &employee.approver_emp_id));
        }

        let rule = self
            .billing_rules
            .get(&employee.billing_rule_id)
            .ok_or_else(|| missing("billing_rule_id", &employee.billing_rule_id))?;
        if rule.vendor_name != employee.vendor_name {
            return Err(EngineError::invalid_field(
                "employee",
                "billing_rule_id",
                format!(
                    "billing rule '{}' belongs to vendor '{}', not '{}'",
                    rule.rule_id, rule.vendor_name, employee.vendor_name
                ),
            ));
        }

        if let Some(designation) = &employee.designation {
            let known = self
                .designations
                .values()
                .any(|d| &d.designation == designation && d.vendor_name == employee.vendor_name);
            if !known {
                return Err(EngineError::invalid_field(
                    "employee",
                    "designation",
                    format!(
                        "'{}' is not a designation of vendor '{}'",
                        designation, employee.vendor_name
                    ),
                ));
            }
        }

        Ok(())
    }

    fn employees_where(&self, predicate: impl Fn(&Employee) -> bool) -> usize {
        self.employees.values().filter(|e| predicate(e)).count()
    }
}

impl Registry {
    // ---------------------------------------------------------------------
    // Vendors
    // ---------------------------------------------------------------------

    /// Lists vendors ordered by name.
    pub fn vendors(&self) -> Vec<Vendor> {
        self.tables.read().vendors.values().cloned().collect()
    }

    /// Adds a vendor.
    pub fn create_vendor(&self, vendor: Vendor) -> EngineResult<Vendor> {
        vendor.validate()?;
        let mut tables = self.tables.write();
        if tables.vendors.contains_key(&vendor.vendor_name) {
            return Err(EngineError::Duplicate {
                entity: "vendor",
                key: vendor.vendor_name,
            });
        }
        tables
            .vendors
            .insert(vendor.vendor_name.clone(), vendor.clone());
        debug!(vendor_name = %vendor.vendor_name, "Vendor created");
        Ok(vendor)
    }

    /// Removes a vendor that nothing references.
    pub fn delete_vendor(&self, vendor_name: &str) -> EngineResult<()> {
        let mut tables = self.tables.write();
        if !tables.vendors.contains_key(vendor_name) {
            return Err(EngineError::not_found("vendor", vendor_name));
        }

        let rules = tables
            .billing_rules
            .values()
            .filter(|r| r.vendor_name == vendor_name)
            .count();
        in_use("vendor", vendor_name, rules, "billing rule")?;
        let designations = tables
            .designations
            .values()
            .filter(|d| d.vendor_name == vendor_name)
            .count();
        in_use("vendor", vendor_name, designations, "designation")?;
        let employees = tables.employees_where(|e| e.vendor_name == vendor_name);
        in_use("vendor", vendor_name, employees, "employee")?;

        tables.vendors.remove(vendor_name);
        Ok(())
    }

    /// Returns the billing rules and designations available for a vendor.
    pub fn vendor_options(&self, vendor_name: &str) -> EngineResult<VendorOptions> {
        let tables = self.tables.read();
        if !tables.vendors.contains_key(vendor_name) {
            return Err(EngineError::not_found("vendor", vendor_name));
        }
        Ok(vendor_options(
            vendor_name,
            tables.billing_rules.values(),
            tables.designations.values(),
        ))
    }

    // ---------------------------------------------------------------------
    // Locations
    // ---------------------------------------------------------------------

    /// Lists locations ordered by name.
    pub fn locations(&self) -> Vec<Location> {
        self.tables.read().locations.values().cloned().collect()
    }

    /// Adds a location.
    pub fn create_location(&self, location: Location) -> EngineResult<Location> {
        location.validate()?;
        let mut tables = self.tables.write();
        if tables.locations.contains_key(&location.location) {
            return Err(EngineError::Duplicate {
                entity: "location",
                key: location.location,
            });
        }
        tables
            .locations
            .insert(location.location.clone(), location.clone());
        Ok(location)
    }

    /// Changes the state of a location.
    pub fn update_location(&self, location: &str, state: String) -> EngineResult<Location> {
        let updated = Location {
            location: location.to_string(),
            state,
        };
        updated.validate()?;

        let mut tables = self.tables.write();
        let existing = tables
            .locations
            .get_mut(location)
            .ok_or_else(|| EngineError::not_found("location", location))?;
        *existing = updated.clone();
        Ok(updated)
    }

    /// Removes a location no employee works at.
    pub fn delete_location(&self, location: &str) -> EngineResult<()> {
        let mut tables = self.tables.write();
        if !tables.locations.contains_key(location) {
            return Err(EngineError::not_found("location", location));
        }
        let employees = tables.employees_where(|e| e.location == location);
        in_use("location", location, employees, "employee")?;
        tables.locations.remove(location);
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Approvers
    // ---------------------------------------------------------------------

    /// Lists approvers ordered by employee ID.
    pub fn approvers(&self) -> Vec<Approver> {
        self.tables.read().approvers.values().cloned().collect()
    }

    /// Looks up an approver by employee ID.
    pub fn approver(&self, emp_id: &str) -> EngineResult<Approver> {
        self.tables
            .read()
            .approvers
            .get(emp_id)
            .cloned()
            .ok_or_else(|| EngineError::not_found("approver", emp_id))
    }

    /// Adds an approver, storing only the salted password hash.
    pub fn create_approver(&self, new: NewApprover) -> EngineResult<Approver> {
        if new.password.is_empty() {
            return Err(EngineError::invalid_field(
                "approver",
                "password",
                "emp_id, name, email, and password are required",
            ));
        }
        let approver = Approver {
            emp_id: new.emp_id,
            name: new.name,
            email: new.email,
            password_hash: hash_password(&new.password)?,
            manager_emp_id: optional(new.manager_emp_id),
            manager_name: optional(new.manager_name),
            manager_email: optional(new.manager_email),
        };
        approver.validate()?;

        let mut tables = self.tables.write();
        if tables.approvers.contains_key(&approver.emp_id) {
            return Err(EngineError::Duplicate {
                entity: "approver",
                key: approver.emp_id,
            });
        }
        tables
            .approvers
            .insert(approver.emp_id.clone(), approver.clone());
        Ok(approver)
    }

    /// Updates an approver's details.
    pub fn update_approver(&self, emp_id: &str, update: ApproverUpdate) -> EngineResult<Approver> {
        // Hashing is slow; do it before taking the lock.
        let new_hash = match update.password.as_deref() {
            Some(password) if !password.is_empty() => Some(hash_password(password)?),
            _ => None,
        };

        let mut tables = self.tables.write();
        let existing = tables
            .approvers
            .get(emp_id)
            .ok_or_else(|| EngineError::not_found("approver", emp_id))?;

        let password_hash = new_hash.unwrap_or_else(|| existing.password_hash.clone());
        let approver = Approver {
            emp_id: emp_id.to_string(),
            name: update.name,
            email: update.email,
            password_hash,
            manager_emp_id: optional(update.manager_emp_id),
            manager_name: optional(update.manager_name),
            manager_email: optional(update.manager_email),
        };
        approver.validate()?;

        tables
            .approvers
            .insert(approver.emp_id.clone(), approver.clone());
        Ok(approver)
    }

    /// Removes an approver no employee is assigned to.
    pub fn delete_approver(&self, emp_id: &str) -> EngineResult<()> {
        let mut tables = self.tables.write();
        if !tables.approvers.contains_key(emp_id) {
            return Err(EngineError::not_found("approver", emp_id));
        }
        let employees = tables.employees_where(|e| e.approver_emp_id == emp_id);
        in_use("approver", emp_id, employees, "employee")?;
        tables.approvers.remove(emp_id);
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Billing-cycle rules
    // ---------------------------------------------------------------------

    /// Lists billing-cycle rules ordered by rule ID.
    pub fn billing_rules(&self) -> Vec<BillingCycleRule> {
        self.tables.read().billing_rules.values().cloned().collect()
    }

    /// Adds a billing-cycle rule for an existing vendor.
    pub fn create_billing_rule(&self, rule: BillingCycleRule) -> EngineResult<BillingCycleRule> {
        rule.validate()?;
        let mut tables = self.tables.write();
        if tables.billing_rules.contains_key(&rule.rule_id) {
            return Err(EngineError::Duplicate {
                entity: "billing rule",
                key: rule.rule_id,
            });
        }
        if !tables.vendors.contains_key(&rule.vendor_name) {
            return Err(EngineError::invalid_field(
                "billing rule",
                "vendor_name",
                format!("unknown vendor_name '{}'", rule.vendor_name),
            ));
        }
        tables
            .billing_rules
            .insert(rule.rule_id.clone(), rule.clone());
        Ok(rule)
    }

    /// Changes a rule's start day or vendor.
    ///
    /// The vendor cannot change while employees are billed on the rule.
    pub fn update_billing_rule(
        &self,
        rule_id: &str,
        start_day: u32,
        vendor_name: String,
    ) -> EngineResult<BillingCycleRule> {
        let rule = BillingCycleRule {
            rule_id: rule_id.to_string(),
            start_day,
            vendor_name,
        };
        rule.validate()?;

        let mut tables = self.tables.write();
        let existing = tables
            .billing_rules
            .get(rule_id)
            .ok_or_else(|| EngineError::not_found("billing rule", rule_id))?;
        if !tables.vendors.contains_key(&rule.vendor_name) {
            return Err(EngineError::invalid_field(
                "billing rule",
                "vendor_name",
                format!("unknown vendor_name '{}'", rule.vendor_name),
            ));
        }
        if existing.vendor_name != rule.vendor_name {
            let employees = tables.employees_where(|e| e.billing_rule_id == rule_id);
            in_use("billing rule", rule_id, employees, "employee")?;
        }

        tables
            .billing_rules
            .insert(rule.rule_id.clone(), rule.clone());
        Ok(rule)
    }

    /// Removes a billing-cycle rule no employee is billed on.
    pub fn delete_billing_rule(&self, rule_id: &str) -> EngineResult<()> {
        let mut tables = self.tables.write();
        if !tables.billing_rules.contains_key(rule_id) {
            return Err(EngineError::not_found("billing rule", rule_id));
        }
        let employees = tables.employees_where(|e| e.billing_rule_id == rule_id);
        in_use("billing rule", rule_id, employees, "employee")?;
        tables.billing_rules.remove(rule_id);
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Designations
    // ---------------------------------------------------------------------

    /// Lists designations, optionally only those of one vendor.
    pub fn designations(&self, vendor_name: Option<&str>) -> Vec<Designation> {
        self.tables
            .read()
            .designations
            .values()
            .filter(|d| vendor_name.is_none_or(|v| d.vendor_name == v))
            .cloned()
            .collect()
    }

    fn check_designation(tables: &Tables, new: &NewDesignation, skip_id: Option<u64>) -> EngineResult<()> {
        if !tables.vendors.contains_key(&new.vendor_name) {
            return Err(EngineError::invalid_field(
                "designation",
                "vendor_name",
                format!("unknown vendor_name '{}'", new.vendor_name),
            ));
        }
        let duplicate = tables.designations.values().any(|d| {
            Some(d.designation_id) != skip_id
                && d.designation == new.designation
                && d.vendor_name == new.vendor_name
        });
        if duplicate {
            return Err(EngineError::Duplicate {
                entity: "designation",
                key: format!("{} ({})", new.designation, new.vendor_name),
            });
        }
        Ok(())
    }

    /// Adds a designation for an existing vendor.
    pub fn create_designation(&self, new: NewDesignation) -> EngineResult<Designation> {
        let mut tables = self.tables.write();
        let candidate = Designation {
            designation_id: tables.last_designation_id + 1,
            designation: new.designation.trim().to_string(),
            vendor_name: new.vendor_name.clone(),
        };
        candidate.validate()?;
        Self::check_designation(
            &tables,
            &NewDesignation {
                designation: candidate.designation.clone(),
                vendor_name: new.vendor_name,
            },
            None,
        )?;

        tables.last_designation_id = candidate.designation_id;
        tables
            .designations
            .insert(candidate.designation_id, candidate.clone());
        Ok(candidate)
    }

    /// Replaces a designation's title or vendor while no employee holds it.
    pub fn update_designation(
        &self,
        designation_id: u64,
        new: NewDesignation,
    ) -> EngineResult<Designation> {
        let mut tables = self.tables.write();
        let existing = tables
            .designations
            .get(&designation_id)
            .cloned()
            .ok_or_else(|| EngineError::not_found("designation", designation_id.to_string()))?;

        let updated = Designation {
            designation_id,
            designation: new.designation.trim().to_string(),
            vendor_name: new.vendor_name.clone(),
        };
        updated.validate()?;
        Self::check_designation(
            &tables,
            &NewDesignation {
                designation: updated.designation.clone(),
                vendor_name: new.vendor_name,
            },
            Some(designation_id),
        )?;

        if existing != updated {
            let holders = tables.employees_where(|e| {
                e.vendor_name == existing.vendor_name
                    && e.designation.as_deref() == Some(existing.designation.as_str())
            });
            in_use("designation", &designation_id.to_string(), holders, "employee")?;
        }

        tables.designations.insert(designation_id, updated.clone());
        Ok(updated)
    }

    /// Removes a designation no employee holds.
    pub fn delete_designation(&self, designation_id: u64) -> EngineResult<()> {
        let mut tables = self.tables.write();
        let existing = tables
            .designations
            .get(&designation_id)
            .cloned()
            .ok_or_else(|| EngineError::not_found("designation", designation_id.to_string()))?;
        let holders = tables.employees_where(|e| {
            e.vendor_name == existing.vendor_name
                && e.designation.as_deref() == Some(existing.designation.as_str())
        });
        in_use("designation", &designation_id.to_string(), holders, "employee")?;
        tables.designations.remove(&designation_id);
        Ok(())
    }

    // ---------------------------------------------------------------------
    // Employees
    // ---------------------------------------------------------------------

    /// Lists employees ordered by employee ID.
    pub fn employees(&self) -> Vec<Employee> {
        self.tables.read().employees.values().cloned().collect()
    }

    /// Looks up an employee by ID.
    pub fn employee(&self, emp_id: &str) -> EngineResult<Employee> {
        self.tables
            .read()
            .employees
            .get(emp_id)
            .cloned()
            .ok_or_else(|| EngineError::not_found("employee", emp_id))
    }

    fn normalize_employee(mut employee: Employee) -> Employee {
        employee.designation = optional(employee.designation);
        employee.resigned |= employee.resignation_date.is_some();
        employee
    }

    /// Adds an employee after checking all references.
    pub fn create_employee(&self, employee: Employee) -> EngineResult<Employee> {
        let employee = Self::normalize_employee(employee);
        employee.validate()?;

        let mut tables = self.tables.write();
        if tables.employees.contains_key(&employee.emp_id) {
            return Err(EngineError::Duplicate {
                entity: "employee",
                key: employee.emp_id,
            });
        }
        tables.check_employee_references(&employee)?;
        tables
            .employees
            .insert(employee.emp_id.clone(), employee.clone());
        debug!(emp_id = %employee.emp_id, "Employee created");
        Ok(employee)
    }

    /// Replaces an employee's record; the employee ID comes from `emp_id`.
    pub fn update_employee(&self, emp_id: &str, employee: Employee) -> EngineResult<Employee> {
        let employee = Self::normalize_employee(Employee {
            emp_id: emp_id.to_string(),
            ..employee
        });
        employee.validate()?;

        let mut tables = self.tables.write();
        if !tables.employees.contains_key(emp_id) {
            return Err(EngineError::not_found("employee", emp_id));
        }
        tables.check_employee_references(&employee)?;
        tables
            .employees
            .insert(employee.emp_id.clone(), employee.clone());
        Ok(employee)
    }

    /// Removes an employee without attendance history.
    pub fn delete_employee(&self, emp_id: &str) -> EngineResult<()> {
        let mut tables = self.tables.write();
        if !tables.employees.contains_key(emp_id) {
            return Err(EngineError::not_found("employee", emp_id));
        }
        let records = tables
            .attendance
            .values()
            .filter(|r| r.emp_id == emp_id)
            .count();
        in_use("employee", emp_id, records, "attendance record")?;
        tables.employees.remove(emp_id);
        Ok(())
    }
}
