use serde::{Deserialize, Serialize};

use super::roles::{Role, RoleField};
use crate::shared::wire;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    #[serde(rename = "correo")]
    pub email: String,
    #[serde(rename = "contrasena")]
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    #[serde(alias = "access_token")]
    pub token: String,
    #[serde(rename = "usuario", alias = "user")]
    pub user: SessionUser,
}

/// Body of `GET /auth/me`: either `{usuario: ..}` or the user itself.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum MeResponse {
    Wrapped {
        #[serde(alias = "user")]
        usuario: SessionUser,
    },
    Bare(SessionUser),
}

impl MeResponse {
    pub fn into_user(self) -> SessionUser {
        match self {
            MeResponse::Wrapped { usuario } => usuario,
            MeResponse::Bare(user) => user,
        }
    }
}

/// The logged-in user as returned by `/auth/login` and `/auth/me`.
///
/// Also persisted in localStorage, so it round-trips through serde.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawSessionUser")]
pub struct SessionUser {
    #[serde(rename = "id_usuario", alias = "id")]
    pub id: i64,
    #[serde(rename = "nombre")]
    pub first_name: String,
    #[serde(rename = "apellido", default, deserialize_with = "wire::opt_string")]
    pub last_name: Option<String>,
    #[serde(rename = "correo")]
    pub email: String,
    #[serde(rename = "rol")]
    pub role: Role,
    #[serde(rename = "id_rol", skip_serializing_if = "Option::is_none")]
    pub role_id: Option<i64>,
    #[serde(rename = "id_sucursal", default, deserialize_with = "wire::opt_id")]
    pub branch_id: Option<i64>,
    #[serde(rename = "activo", default = "default_active", deserialize_with = "wire::flexible_bool")]
    pub active: bool,
}

fn default_active() -> bool {
    true
}

/// Wire shape of a user: the role comes as `rol` (name or joined row) or
/// flat as `nombre_rol` next to `id_rol`.
#[derive(Deserialize)]
struct RawSessionUser {
    #[serde(rename = "id_usuario", alias = "id")]
    id: i64,
    nombre: String,
    #[serde(default, deserialize_with = "wire::opt_string")]
    apellido: Option<String>,
    correo: String,
    #[serde(default)]
    rol: Option<RoleField>,
    #[serde(default, alias = "nombre_rol_usuario", deserialize_with = "wire::opt_string")]
    nombre_rol: Option<String>,
    #[serde(default, deserialize_with = "wire::opt_id")]
    id_rol: Option<i64>,
    #[serde(default, deserialize_with = "wire::opt_id")]
    id_sucursal: Option<i64>,
    #[serde(default = "default_active", deserialize_with = "wire::flexible_bool")]
    activo: bool,
}

impl TryFrom<RawSessionUser> for SessionUser {
    type Error = String;

    fn try_from(raw: RawSessionUser) -> Result<Self, Self::Error> {
        let role = match (raw.rol, raw.nombre_rol) {
            (Some(field), _) => field.into_role()?,
            (None, Some(name)) => name.parse()?,
            (None, None) => return Err(format!("Usuario {} sin rol", raw.id)),
        };
        Ok(SessionUser {
            id: raw.id,
            first_name: raw.nombre,
            last_name: raw.apellido,
            email: raw.correo,
            role,
            role_id: raw.id_rol,
            branch_id: raw.id_sucursal,
            active: raw.activo,
        })
    }
}

impl SessionUser {
    pub fn display_name(&self) -> String {
        match &self.last_name {
            Some(last) => format!("{} {}", self.first_name, last),
            None => self.first_name.clone(),
        }
    }

    pub fn initials(&self) -> String {
        let mut out = String::new();
        if let Some(c) = self.first_name.chars().next() {
            out.extend(c.to_uppercase());
        }
        if let Some(c) = self.last_name.as_deref().and_then(|l| l.chars().next()) {
            out.extend(c.to_uppercase());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_login_request_uses_backend_names() {
        let req = LoginRequest {
            email: "ana@sgr.com".into(),
            password: "secreta".into(),
        };
        assert_eq!(
            serde_json::to_value(req).unwrap(),
            json!({"correo": "ana@sgr.com", "contrasena": "secreta"})
        );
    }

    #[test]
    fn test_login_response_mapping() {
        let resp: LoginResponse = serde_json::from_value(json!({
            "token": "abc",
            "usuario": {
                "id_usuario": 7,
                "nombre": "Ana",
                "apellido": "Gómez",
                "correo": "ana@sgr.com",
                "rol": {"id_rol": 2, "nombre_rol": "ASESOR"},
                "id_sucursal": "3",
                "activo": 1
            }
        }))
        .unwrap();
        assert_eq!(resp.token, "abc");
        assert_eq!(resp.user.id, 7);
        assert_eq!(resp.user.role, Role::Asesor);
        assert_eq!(resp.user.branch_id, Some(3));
        assert!(resp.user.active);
        assert_eq!(resp.user.display_name(), "Ana Gómez");
        assert_eq!(resp.user.initials(), "AG");
    }

    #[test]
    fn test_session_user_roundtrips_through_storage() {
        let user: SessionUser = serde_json::from_value(json!({
            "id_usuario": 1, "nombre": "Luis", "correo": "l@sgr.com", "rol": "Mensajero"
        }))
        .unwrap();
        assert!(user.active);
        assert_eq!(user.display_name(), "Luis");
        let stored = serde_json::to_string(&user).unwrap();
        let back: SessionUser = serde_json::from_str(&stored).unwrap();
        assert_eq!(back, user);
    }

    #[test]
    fn test_session_user_flat_role_columns() {
        let user: SessionUser = serde_json::from_value(json!({
            "id_usuario": 1,
            "nombre": "Ana",
            "correo": "a@b.co",
            "id_rol": 1,
            "nombre_rol": "Administrador",
            "activo": 1
        }))
        .unwrap();
        assert_eq!(user.role, Role::Administrador);
        assert_eq!(user.role_id, Some(1));

        let stored = serde_json::to_string(&user).unwrap();
        assert_eq!(serde_json::from_str::<SessionUser>(&stored).unwrap(), user);
    }

    #[test]
    fn test_session_user_without_role_is_rejected() {
        let res = serde_json::from_value::<SessionUser>(json!({
            "id_usuario": 1, "nombre": "Ana", "correo": "a@b.co", "id_rol": 1
        }));
        assert!(res.is_err());
    }

    #[test]
    fn test_me_response_shapes() {
        let user = json!({"id_usuario": 3, "nombre": "Luis", "correo": "l@sgr.com", "rol": "Supervisor"});
        let bare: MeResponse = serde_json::from_value(user.clone()).unwrap();
        let wrapped: MeResponse = serde_json::from_value(json!({ "usuario": user })).unwrap();
        assert_eq!(bare.into_user(), wrapped.into_user());
    }
}
