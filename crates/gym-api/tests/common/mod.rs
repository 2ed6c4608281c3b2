// In-memory store and request helpers shared by the router tests

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::{NaiveDate, NaiveDateTime, Utc};
use gym_api::{build_router, AppState};
use gym_core::domain::*;
use gym_core::repositories::*;
use gym_core::update::{FieldValue, UpdatePlan};
use gym_core::DomainError;
use gym_security::JwtService;
use gym_shared::{EntityId, Role, UserStatus};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

pub const SECRET: &str = "integration-test-secret-0123456789abcdef";

pub const ADMIN_ID: EntityId = 1;
pub const STAFF_ID: EntityId = 2;
pub const INACTIVE_ID: EntityId = 3;
pub const MEMBER_ID: EntityId = 7;

#[derive(Default)]
struct Data {
    users: Vec<User>,
    members: Vec<Member>,
    packages: Vec<Package>,
    checkins: Vec<Checkin>,
    payments: Vec<Payment>,
    next_id: EntityId,
}

impl Data {
    fn next_id(&mut self) -> EntityId {
        self.next_id += 1;
        self.next_id
    }
}

/// Implements every repository port over plain vectors. Update plans are
/// applied column by column, so these tests exercise the same plans the
/// Postgres adapter would execute.
#[derive(Default)]
pub struct MemoryStore {
    data: Mutex<Data>,
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

fn user(id: EntityId, username: &str, password: &str, role: Role, status: UserStatus) -> User {
    User {
        id,
        username: username.into(),
        // Low-cost bcrypt keeps the fixtures fast; login still goes through
        // the legacy-hash branch of the verifier.
        password_hash: bcrypt::hash(password, 4).unwrap(),
        full_name: format!("{} User", username),
        role,
        status,
        created_at: Utc::now(),
        updated_at: Utc::now(),
    }
}

impl MemoryStore {
    pub fn seeded() -> Self {
        let data = Data {
            users: vec![
                user(ADMIN_ID, "admin", "admin123", Role::Admin, UserStatus::Active),
                user(STAFF_ID, "staff", "staff123", Role::Staff, UserStatus::Active),
                user(INACTIVE_ID, "retired", "retired1", Role::Staff, UserStatus::Inactive),
            ],
            packages: vec![
                Package {
                    package_id: 1,
                    package_name: "Monthly".into(),
                    price: 1000.0,
                    duration_days: 30,
                    description: None,
                },
                Package {
                    package_id: 2,
                    package_name: "Yearly".into(),
                    price: 9000.0,
                    duration_days: 365,
                    description: Some("Best value".into()),
                },
            ],
            members: vec![Member {
                member_id: MEMBER_ID,
                first_name: "Somchai".into(),
                last_name: "Jaidee".into(),
                phone_number: Some("0812345678".into()),
                package_id: 1,
                start_date: date(2024, 1, 1),
                expiry_date: Some(date(2024, 1, 31)),
                photo_url: None,
                is_active: 1,
            }],
            next_id: 100,
            ..Data::default()
        };
        Self {
            data: Mutex::new(data),
        }
    }

    pub fn member(&self, id: EntityId) -> Option<Member> {
        let data = self.data.lock().unwrap();
        data.members.iter().find(|m| m.member_id == id).cloned()
    }

    pub fn user(&self, id: EntityId) -> Option<User> {
        let data = self.data.lock().unwrap();
        data.users.iter().find(|u| u.id == id).cloned()
    }
}

fn text(value: &FieldValue) -> Option<String> {
    value.as_text().map(str::to_owned)
}

fn required_text(value: &FieldValue) -> String {
    text(value).expect("non-null text")
}

fn missing_reference(column: &str) -> DomainError {
    DomainError::invalid(column, "references a record that does not exist")
}

#[async_trait]
impl UserRepository for MemoryStore {
    async fn list(&self) -> Result<Vec<User>, DomainError> {
        Ok(self.data.lock().unwrap().users.clone())
    }

    async fn find_by_id(&self, id: EntityId) -> Result<Option<User>, DomainError> {
        Ok(self.user(id))
    }

    async fn find_by_username(&self, username: &str) -> Result<Option<User>, DomainError> {
        let data = self.data.lock().unwrap();
        Ok(data.users.iter().find(|u| u.username == username).cloned())
    }

    async fn username_taken(&self, username: &str, exclude: Option<EntityId>) -> Result<bool, DomainError> {
        let data = self.data.lock().unwrap();
        Ok(data
            .users
            .iter()
            .any(|u| u.username == username && Some(u.id) != exclude))
    }

    async fn create(&self, new: &NewUser) -> Result<User, DomainError> {
        let mut data = self.data.lock().unwrap();
        let id = data.next_id();
        let created = User {
            id,
            username: new.username.clone(),
            password_hash: new.password_hash.clone(),
            full_name: new.full_name.clone(),
            role: new.role,
            status: new.status,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        data.users.push(created.clone());
        Ok(created)
    }

    async fn apply(&self, plan: &UpdatePlan) -> Result<u64, DomainError> {
        assert_eq!(plan.table(), "users");
        let mut data = self.data.lock().unwrap();
        let Some(row) = data.users.iter_mut().find(|u| u.id == plan.key()) else {
            return Ok(0);
        };
        for a in plan.assignments() {
            match a.column {
                "username" => row.username = required_text(&a.value),
                "password_hash" => row.password_hash = required_text(&a.value),
                "full_name" => row.full_name = required_text(&a.value),
                "role" => row.role = Role::parse(&required_text(&a.value)).expect("role"),
                "status" => row.status = UserStatus::parse(&required_text(&a.value)).expect("status"),
                other => panic!("unexpected users column {}", other),
            }
        }
        row.updated_at = Utc::now();
        Ok(1)
    }

    async fn delete(&self, id: EntityId) -> Result<u64, DomainError> {
        let mut data = self.data.lock().unwrap();
        let before = data.users.len();
        data.users.retain(|u| u.id != id);
        Ok((before - data.users.len()) as u64)
    }
}

#[async_trait]
impl MemberRepository for MemoryStore {
    async fn list(&self) -> Result<Vec<MemberSummary>, DomainError> {
        let data = self.data.lock().unwrap();
        Ok(data
            .members
            .iter()
            .filter_map(|m| {
                let package = data.packages.iter().find(|p| p.package_id == m.package_id)?;
                Some(MemberSummary {
                    member_id: m.member_id,
                    first_name: m.first_name.clone(),
                    last_name: m.last_name.clone(),
                    phone_number: m.phone_number.clone(),
                    start_date: m.start_date,
                    expiry_date: m.expiry_date,
                    is_active: m.is_active,
                    package_name: package.package_name.clone(),
                    price: package.price,
                })
            })
            .collect())
    }

    async fn find_by_id(&self, id: EntityId) -> Result<Option<Member>, DomainError> {
        Ok(self.member(id))
    }

    async fn find_detail(&self, id: EntityId) -> Result<Option<MemberDetail>, DomainError> {
        let data = self.data.lock().unwrap();
        Ok(data.members.iter().find(|m| m.member_id == id).and_then(|m| {
            let package = data.packages.iter().find(|p| p.package_id == m.package_id)?;
            Some(MemberDetail {
                member: m.clone(),
                package_name: package.package_name.clone(),
            })
        }))
    }

    async fn create(&self, new: &NewMember) -> Result<Member, DomainError> {
        let mut data = self.data.lock().unwrap();
        if !data.packages.iter().any(|p| p.package_id == new.package_id) {
            return Err(missing_reference("package_id"));
        }
        let member = Member {
            member_id: data.next_id(),
            first_name: new.first_name.clone(),
            last_name: new.last_name.clone(),
            phone_number: new.phone_number.clone(),
            package_id: new.package_id,
            start_date: new.start_date,
            expiry_date: new.expiry_date,
            photo_url: new.photo_url.clone(),
            is_active: new.is_active,
        };
        data.members.push(member.clone());
        Ok(member)
    }

    async fn apply(&self, plan: &UpdatePlan) -> Result<u64, DomainError> {
        assert_eq!(plan.table(), "members");
        let mut data = self.data.lock().unwrap();
        if let Some(package_id) = plan.value_of("package_id").and_then(FieldValue::as_integer) {
            if !data.packages.iter().any(|p| p.package_id == package_id) {
                return Err(missing_reference("package_id"));
            }
        }
        let Some(row) = data.members.iter_mut().find(|m| m.member_id == plan.key()) else {
            return Ok(0);
        };
        for a in plan.assignments() {
            match a.column {
                "first_name" => row.first_name = required_text(&a.value),
                "last_name" => row.last_name = required_text(&a.value),
                "phone_number" => row.phone_number = text(&a.value),
                "package_id" => row.package_id = a.value.as_integer().expect("package_id"),
                "start_date" => row.start_date = a.value.as_timestamp().flatten().expect("start_date"),
                "expiry_date" => row.expiry_date = a.value.as_timestamp().flatten(),
                "photo_url" => row.photo_url = text(&a.value),
                "is_active" => row.is_active = a.value.as_small_int().expect("is_active"),
                other => panic!("unexpected members column {}", other),
            }
        }
        Ok(1)
    }

    async fn delete(&self, id: EntityId) -> Result<u64, DomainError> {
        let mut data = self.data.lock().unwrap();
        let before = data.members.len();
        data.members.retain(|m| m.member_id != id);
        Ok((before - data.members.len()) as u64)
    }
}

#[async_trait]
impl PackageRepository for MemoryStore {
    async fn list(&self) -> Result<Vec<Package>, DomainError> {
        Ok(self.data.lock().unwrap().packages.clone())
    }

    async fn find_by_id(&self, id: EntityId) -> Result<Option<Package>, DomainError> {
        let data = self.data.lock().unwrap();
        Ok(data.packages.iter().find(|p| p.package_id == id).cloned())
    }

    async fn exists(&self, id: EntityId) -> Result<bool, DomainError> {
        let data = self.data.lock().unwrap();
        Ok(data.packages.iter().any(|p| p.package_id == id))
    }

    async fn name_taken(&self, name: &str, exclude: Option<EntityId>) -> Result<bool, DomainError> {
        let data = self.data.lock().unwrap();
        Ok(data
            .packages
            .iter()
            .any(|p| p.package_name == name && Some(p.package_id) != exclude))
    }

    async fn create(&self, new: &NewPackage) -> Result<Package, DomainError> {
        let mut data = self.data.lock().unwrap();
        let package = Package {
            package_id: data.next_id(),
            package_name: new.package_name.clone(),
            price: new.price,
            duration_days: new.duration_days,
            description: new.description.clone(),
        };
        data.packages.push(package.clone());
        Ok(package)
    }

    async fn apply(&self, plan: &UpdatePlan) -> Result<u64, DomainError> {
        assert_eq!(plan.table(), "packages");
        let mut data = self.data.lock().unwrap();
        let Some(row) = data.packages.iter_mut().find(|p| p.package_id == plan.key()) else {
            return Ok(0);
        };
        for a in plan.assignments() {
            match a.column {
                "package_name" => row.package_name = required_text(&a.value),
                "price" => row.price = a.value.as_number().expect("price"),
                "duration_days" => row.duration_days = a.value.as_integer().expect("duration_days"),
                "description" => row.description = text(&a.value),
                other => panic!("unexpected packages column {}", other),
            }
        }
        Ok(1)
    }

    async fn delete(&self, id: EntityId) -> Result<u64, DomainError> {
        let mut data = self.data.lock().unwrap();
        if data.members.iter().any(|m| m.package_id == id) {
            return Err(DomainError::StillReferenced(format!("package {}", id)));
        }
        let before = data.packages.len();
        data.packages.retain(|p| p.package_id != id);
        Ok((before - data.packages.len()) as u64)
    }
}

fn checkin_view(data: &Data, c: &Checkin) -> Option<CheckinView> {
    let member = data.members.iter().find(|m| m.member_id == c.member_id)?;
    let staff = data.users.iter().find(|u| u.id == c.staff_id)?;
    Some(CheckinView {
        checkin_id: c.checkin_id,
        member_id: c.member_id,
        staff_id: c.staff_id,
        check_in_time: c.check_in_time,
        check_out_time: c.check_out_time,
        first_name: member.first_name.clone(),
        last_name: member.last_name.clone(),
        staff_name: staff.full_name.clone(),
    })
}

#[async_trait]
impl CheckinRepository for MemoryStore {
    async fn list(&self) -> Result<Vec<CheckinView>, DomainError> {
        let data = self.data.lock().unwrap();
        let mut views: Vec<CheckinView> = data.checkins.iter().filter_map(|c| checkin_view(&data, c)).collect();
        views.sort_by(|a, b| b.check_in_time.cmp(&a.check_in_time));
        Ok(views)
    }

    async fn find_by_id(&self, id: EntityId) -> Result<Option<CheckinView>, DomainError> {
        let data = self.data.lock().unwrap();
        Ok(data
            .checkins
            .iter()
            .find(|c| c.checkin_id == id)
            .and_then(|c| checkin_view(&data, c)))
    }

    async fn create(&self, new: &NewCheckin) -> Result<Checkin, DomainError> {
        let mut data = self.data.lock().unwrap();
        if !data.members.iter().any(|m| m.member_id == new.member_id) {
            return Err(missing_reference("member_id"));
        }
        if !data.users.iter().any(|u| u.id == new.staff_id) {
            return Err(missing_reference("staff_id"));
        }
        let checkin = Checkin {
            checkin_id: data.next_id(),
            member_id: new.member_id,
            check_in_time: Utc::now(),
            check_out_time: None,
            staff_id: new.staff_id,
        };
        data.checkins.push(checkin.clone());
        Ok(checkin)
    }

    async fn check_out(&self, id: EntityId) -> Result<Option<Checkin>, DomainError> {
        let mut data = self.data.lock().unwrap();
        Ok(data
            .checkins
            .iter_mut()
            .find(|c| c.checkin_id == id && c.check_out_time.is_none())
            .map(|c| {
                c.check_out_time = Some(Utc::now());
                c.clone()
            }))
    }

    async fn delete(&self, id: EntityId) -> Result<u64, DomainError> {
        let mut data = self.data.lock().unwrap();
        let before = data.checkins.len();
        data.checkins.retain(|c| c.checkin_id != id);
        Ok((before - data.checkins.len()) as u64)
    }
}

fn payment_view(data: &Data, p: &Payment) -> Option<PaymentView> {
    let member = data.members.iter().find(|m| m.member_id == p.member_id)?;
    let staff = data.users.iter().find(|u| u.id == p.staff_id)?;
    let package_name = p
        .package_id
        .and_then(|id| data.packages.iter().find(|pk| pk.package_id == id))
        .map(|pk| pk.package_name.clone());
    Some(PaymentView {
        payment_id: p.payment_id,
        member_id: p.member_id,
        package_id: p.package_id,
        amount: p.amount,
        payment_date: p.payment_date,
        staff_id: p.staff_id,
        first_name: member.first_name.clone(),
        last_name: member.last_name.clone(),
        package_name,
        staff_name: staff.full_name.clone(),
    })
}

#[async_trait]
impl PaymentRepository for MemoryStore {
    async fn list(&self) -> Result<Vec<PaymentView>, DomainError> {
        let data = self.data.lock().unwrap();
        let mut views: Vec<PaymentView> = data.payments.iter().filter_map(|p| payment_view(&data, p)).collect();
        views.sort_by(|a, b| b.payment_date.cmp(&a.payment_date));
        Ok(views)
    }

    async fn find_by_id(&self, id: EntityId) -> Result<Option<PaymentView>, DomainError> {
        let data = self.data.lock().unwrap();
        Ok(data
            .payments
            .iter()
            .find(|p| p.payment_id == id)
            .and_then(|p| payment_view(&data, p)))
    }

    async fn create(&self, new: &NewPayment) -> Result<Payment, DomainError> {
        let mut data = self.data.lock().unwrap();
        if !data.members.iter().any(|m| m.member_id == new.member_id) {
            return Err(missing_reference("member_id"));
        }
        if let Some(package_id) = new.package_id {
            if !data.packages.iter().any(|p| p.package_id == package_id) {
                return Err(missing_reference("package_id"));
            }
        }
        let payment = Payment {
            payment_id: data.next_id(),
            member_id: new.member_id,
            package_id: new.package_id,
            amount: new.amount,
            payment_date: Utc::now(),
            staff_id: new.staff_id,
        };
        data.payments.push(payment.clone());
        Ok(payment)
    }

    async fn apply(&self, plan: &UpdatePlan) -> Result<u64, DomainError> {
        assert_eq!(plan.table(), "payments");
        let mut data = self.data.lock().unwrap();
        let Some(row) = data.payments.iter_mut().find(|p| p.payment_id == plan.key()) else {
            return Ok(0);
        };
        for a in plan.assignments() {
            match a.column {
                "member_id" => row.member_id = a.value.as_integer().expect("member_id"),
                "package_id" => row.package_id = a.value.as_integer(),
                "amount" => row.amount = a.value.as_number().expect("amount"),
                "staff_id" => row.staff_id = a.value.as_integer().expect("staff_id"),
                other => panic!("unexpected payments column {}", other),
            }
        }
        Ok(1)
    }

    async fn delete(&self, id: EntityId) -> Result<u64, DomainError> {
        let mut data = self.data.lock().unwrap();
        let before = data.payments.len();
        data.payments.retain(|p| p.payment_id != id);
        Ok((before - data.payments.len()) as u64)
    }
}

pub struct TestApp {
    pub router: Router,
    pub store: Arc<MemoryStore>,
    pub jwt: Arc<JwtService>,
}

impl TestApp {
    pub fn new() -> Self {
        let store = Arc::new(MemoryStore::seeded());
        let jwt = Arc::new(JwtService::new(SECRET, 86_400));
        let repos = Repositories {
            users: store.clone(),
            members: store.clone(),
            packages: store.clone(),
            checkins: store.clone(),
            payments: store.clone(),
        };
        let router = build_router(AppState::new(repos, jwt.clone()));
        Self { router, store, jwt }
    }

    pub fn token_for(&self, user_id: EntityId, role: Role) -> String {
        self.jwt.generate_token(user_id, role).unwrap()
    }

    pub fn admin_token(&self) -> String {
        self.token_for(ADMIN_ID, Role::Admin)
    }

    pub fn staff_token(&self) -> String {
        self.token_for(STAFF_ID, Role::Staff)
    }

    pub async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        self.send_request(request).await
    }

    pub async fn send_request(&self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }
}

/// `error.message` of an envelope
pub fn error_message(body: &Value) -> &str {
    body["error"]["message"].as_str().unwrap_or_default()
}
