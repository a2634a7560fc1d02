//! # Directory Repository
//!
//! Staff and customer lists for the sale selector dropdowns.

use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::DbResult;
use orchid_core::{Customer, StaffMember};

/// Repository for staff and customer records.
#[derive(Debug, Clone)]
pub struct DirectoryRepository {
    pool: SqlitePool,
}

impl DirectoryRepository {
    /// Creates a new DirectoryRepository.
    pub fn new(pool: SqlitePool) -> Self {
        DirectoryRepository { pool }
    }

    /// Lists all staff members ordered by name.
    pub async fn list_staff(&self) -> DbResult<Vec<StaffMember>> {
        let staff = sqlx::query_as::<_, StaffMember>("SELECT id, name FROM staff ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(staff)
    }

    /// Adds a staff member and returns it.
    pub async fn add_staff(&self, name: &str) -> DbResult<StaffMember> {
        let member = StaffMember {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
        };

        sqlx::query("INSERT INTO staff (id, name) VALUES (?1, ?2)")
            .bind(&member.id)
            .bind(&member.name)
            .execute(&self.pool)
            .await?;

        Ok(member)
    }

    /// Lists all customers ordered by name.
    pub async fn list_customers(&self) -> DbResult<Vec<Customer>> {
        let customers = sqlx::query_as::<_, Customer>(
            "SELECT id, name, phone FROM customers ORDER BY name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(customers)
    }

    /// Adds a customer and returns it.
    pub async fn add_customer(&self, name: &str, phone: Option<&str>) -> DbResult<Customer> {
        let customer = Customer {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            phone: phone.map(|p| p.to_string()),
        };

        sqlx::query("INSERT INTO customers (id, name, phone) VALUES (?1, ?2, ?3)")
            .bind(&customer.id)
            .bind(&customer.name)
            .bind(&customer.phone)
            .execute(&self.pool)
            .await?;

        Ok(customer)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
