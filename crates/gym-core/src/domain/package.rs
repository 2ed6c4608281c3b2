//! Subscription package entity

use gym_shared::EntityId;
use serde::Serialize;

use crate::update::{Column, Table};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Package {
    pub package_id: EntityId,
    pub package_name: String,
    pub price: f64,
    pub duration_days: i32,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewPackage {
    pub package_name: String,
    pub price: f64,
    pub duration_days: i32,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PackageField {
    PackageName,
    Price,
    DurationDays,
    Description,
}

impl Column for PackageField {
    const ALL: &'static [Self] = &[
        PackageField::PackageName,
        PackageField::Price,
        PackageField::DurationDays,
        PackageField::Description,
    ];

    fn key(self) -> &'static str {
        match self {
            PackageField::PackageName => "package_name",
            PackageField::Price => "price",
            PackageField::DurationDays => "duration_days",
            PackageField::Description => "description",
        }
    }
}

impl Table for Package {
    type Field = PackageField;

    const TABLE: &'static str = "packages";
    const PRIMARY_KEY: &'static str = "package_id";
}
