use serde::{Deserialize, Serialize};

use super::roles::{self, Role, RoleRecord};
use crate::shared::resource::Resource;
use crate::shared::{validation, wire};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(rename = "id_usuario")]
    pub id: i64,
    #[serde(rename = "nombre")]
    pub first_name: String,
    #[serde(rename = "apellido", default, deserialize_with = "wire::opt_string")]
    pub last_name: Option<String>,
    #[serde(rename = "correo")]
    pub email: String,
    #[serde(rename = "telefono", default, deserialize_with = "wire::opt_string")]
    pub phone: Option<String>,
    #[serde(rename = "id_rol", default, deserialize_with = "wire::opt_id")]
    pub role_id: Option<i64>,
    /// Joined role name, when the backend includes it.
    #[serde(rename = "rol", default, deserialize_with = "roles::opt_role", skip_serializing)]
    pub role: Option<Role>,
    #[serde(rename = "id_sucursal", default, deserialize_with = "wire::opt_id")]
    pub branch_id: Option<i64>,
    #[serde(rename = "activo", default, deserialize_with = "wire::flexible_bool")]
    pub active: bool,
    #[serde(rename = "fecha_creacion", default, deserialize_with = "wire::opt_string")]
    pub created_at: Option<String>,
}

/// Create/update payload for `/usuarios`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserDraft {
    #[serde(rename = "nombre")]
    pub first_name: String,
    #[serde(rename = "apellido", serialize_with = "wire::blank_as_null")]
    pub last_name: Option<String>,
    #[serde(rename = "correo")]
    pub email: String,
    #[serde(rename = "telefono", serialize_with = "wire::blank_as_null")]
    pub phone: Option<String>,
    #[serde(rename = "id_rol")]
    pub role_id: Option<i64>,
    #[serde(rename = "id_sucursal")]
    pub branch_id: Option<i64>,
    #[serde(rename = "activo")]
    pub active: bool,
    /// Only sent when creating a user or explicitly changing the password.
    #[serde(rename = "contrasena", skip_serializing_if = "no_password")]
    pub password: Option<String>,
}

impl Default for UserDraft {
    fn default() -> Self {
        Self {
            first_name: String::new(),
            last_name: None,
            email: String::new(),
            phone: None,
            role_id: None,
            branch_id: None,
            active: true,
            password: None,
        }
    }
}

pub const MIN_PASSWORD_LEN: usize = 6;

fn no_password(value: &Option<String>) -> bool {
    value.as_deref().map(str::trim).unwrap_or("").is_empty()
}

impl From<&User> for UserDraft {
    fn from(user: &User) -> Self {
        Self::from_user(user)
    }
}

impl UserDraft {
    pub fn from_user(user: &User) -> Self {
        Self {
            first_name: user.first_name.clone(),
            last_name: user.last_name.clone(),
            email: user.email.clone(),
            phone: user.phone.clone(),
            role_id: user.role_id,
            branch_id: user.branch_id,
            active: user.active,
            password: None,
        }
    }

    /// New users must carry a password.
    pub fn validate_for_create(&self) -> Result<(), String> {
        if self.password.as_deref().map(str::trim).unwrap_or("").is_empty() {
            return Err("La contraseña es obligatoria para usuarios nuevos".to_string());
        }
        User::validate(self)
    }
}

impl User {
    pub fn display_name(&self) -> String {
        match &self.last_name {
            Some(last) => format!("{} {}", self.first_name, last),
            None => self.first_name.clone(),
        }
    }

    /// Role from the joined name, falling back to the `/roles` catalog.
    pub fn resolve_role(&self, catalog: &[RoleRecord]) -> Option<Role> {
        self.role
            .or_else(|| self.role_id.and_then(|id| roles::role_for_id(catalog, id)))
    }
}

impl Resource for User {
    type Draft = UserDraft;
    const ENDPOINT: &'static str = "/usuarios";
    const LABEL: &'static str = "usuario";

    fn id(&self) -> i64 {
        self.id
    }

    fn from_draft(id: i64, draft: &UserDraft) -> Self {
        Self {
            id,
            first_name: draft.first_name.trim().to_string(),
            last_name: draft.last_name.clone(),
            email: draft.email.trim().to_string(),
            phone: draft.phone.clone(),
            role_id: draft.role_id,
            role: None,
            branch_id: draft.branch_id,
            active: draft.active,
            created_at: None,
        }
    }

    fn validate(draft: &UserDraft) -> Result<(), String> {
        validation::require_text(&draft.first_name, "Nombre")?;
        validation::max_len(&draft.first_name, "Nombre", 100)?;
        validation::email(&draft.email)?;
        validation::optional_phone(draft.phone.as_deref())?;
        if draft.role_id.is_none() {
            return Err("Seleccione un rol".to_string());
        }
        if let Some(pwd) = draft.password.as_deref() {
            if !pwd.trim().is_empty() && pwd.chars().count() < MIN_PASSWORD_LEN {
                return Err(format!(
                    "La contraseña debe tener al menos {MIN_PASSWORD_LEN} caracteres"
                ));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn valid_draft() -> UserDraft {
        UserDraft {
            first_name: "Ana".into(),
            email: "ana@sgr.com".into(),
            role_id: Some(2),
            ..UserDraft::default()
        }
    }

    #[test]
    fn test_user_from_backend_row() {
        let user: User = serde_json::from_value(json!({
            "id_usuario": 5,
            "nombre": "Carlos",
            "apellido": "",
            "correo": "carlos@sgr.com",
            "telefono": null,
            "id_rol": 4,
            "rol": "Mensajero",
            "id_sucursal": 1,
            "activo": "1",
            "fecha_creacion": "2024-01-10T08:00:00Z"
        }))
        .unwrap();
        assert_eq!(user.last_name, None);
        assert_eq!(user.role, Some(Role::Mensajero));
        assert!(user.active);
        assert_eq!(user.display_name(), "Carlos");
    }

    #[test]
    fn test_unknown_joined_role_does_not_fail_row() {
        let user: User = serde_json::from_value(json!({
            "id_usuario": 5, "nombre": "X", "correo": "x@sgr.com", "id_rol": 1, "rol": "Contador"
        }))
        .unwrap();
        assert_eq!(user.role, None);
        let catalog = vec![RoleRecord { id: 1, name: "Administrador".into() }];
        assert_eq!(user.resolve_role(&catalog), Some(Role::Administrador));
    }

    #[test]
    fn test_draft_payload_names() {
        let mut draft = valid_draft();
        draft.phone = Some(" ".into());
        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(
            value,
            json!({
                "nombre": "Ana",
                "apellido": null,
                "correo": "ana@sgr.com",
                "telefono": null,
                "id_rol": 2,
                "id_sucursal": null,
                "activo": true
            })
        );

        draft.password = Some("   ".into());
        let value = serde_json::to_value(&draft).unwrap();
        assert!(value.get("contrasena").is_none());

        draft.password = Some("secreta".into());
        let value = serde_json::to_value(&draft).unwrap();
        assert_eq!(value["contrasena"], json!("secreta"));
    }

    #[test]
    fn test_validation() {
        assert!(User::validate(&valid_draft()).is_ok());
        assert!(valid_draft().validate_for_create().is_err());

        let mut d = valid_draft();
        d.password = Some("123".into());
        assert!(User::validate(&d).is_err());
        d.password = Some("123456".into());
        assert!(d.validate_for_create().is_ok());

        let mut d = valid_draft();
        d.role_id = None;
        assert_eq!(User::validate(&d), Err("Seleccione un rol".to_string()));

        let mut d = valid_draft();
        d.email = "sin-arroba".into();
        assert!(User::validate(&d).is_err());
    }
}
