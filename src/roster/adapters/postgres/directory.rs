//! `PostgreSQL` directory implementation for teams and users.

use super::{
    models::{NewTeamRow, UserRow},
    schema::{teams, users},
};
use crate::postgres::{PgPool, get_conn_with, run_blocking_with};
use crate::roster::{
    domain::{Team, TeamMember, TeamName, User, UserId},
    ports::{DirectoryError, DirectoryResult, TeamDirectory, UserDirectory},
};
use async_trait::async_trait;
use diesel::pg::PgConnection;
use diesel::prelude::*;
use diesel::result::{DatabaseErrorKind, Error as DieselError};
use diesel::upsert::excluded;

/// `PostgreSQL`-backed directory implementing both roster ports.
#[derive(Debug, Clone)]
pub struct PostgresDirectory {
    pool: PgPool,
}

impl PostgresDirectory {
    /// Creates a new directory from a connection pool.
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn run_blocking<F, T>(&self, f: F) -> DirectoryResult<T>
    where
        F: FnOnce(&mut PgConnection) -> DirectoryResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let pool = self.pool.clone();
        run_blocking_with(
            move || {
                let mut connection = get_conn_with(&pool, DirectoryError::persistence)?;
                f(&mut connection)
            },
            DirectoryError::persistence,
        )
        .await
    }
}

impl From<DieselError> for DirectoryError {
    fn from(err: DieselError) -> Self {
        Self::persistence(err)
    }
}

#[async_trait]
impl TeamDirectory for PostgresDirectory {
    async fn create_team(&self, team: &Team) -> DirectoryResult<()> {
        let team_name = team.name().clone();
        let user_rows: Vec<UserRow> = team
            .members()
            .iter()
            .map(|member| to_user_row(&User::from_member(member, team.name())))
            .collect();

        self.run_blocking(move |connection| {
            connection.transaction::<_, DirectoryError, _>(|tx| {
                diesel::insert_into(teams::table)
                    .values(&NewTeamRow {
                        team_name: team_name.as_str().to_owned(),
                    })
                    .execute(tx)
                    .map_err(|err| match err {
                        DieselError::DatabaseError(DatabaseErrorKind::UniqueViolation, _) => {
                            DirectoryError::DuplicateTeam(team_name.clone())
                        }
                        other => DirectoryError::persistence(other),
                    })?;

                diesel::insert_into(users::table)
                    .values(&user_rows)
                    .on_conflict(users::user_id)
                    .do_update()
                    .set((
                        users::username.eq(excluded(users::username)),
                        users::team_name.eq(excluded(users::team_name)),
                        users::is_active.eq(excluded(users::is_active)),
                    ))
                    .execute(tx)?;
                Ok(())
            })
        })
        .await
    }

    async fn find_team_by_name(&self, name: &TeamName) -> DirectoryResult<Option<Team>> {
        let lookup = name.clone();
        self.run_blocking(move |connection| load_team(connection, &lookup))
            .await
    }

    async fn find_team_by_member(&self, user_id: &UserId) -> DirectoryResult<Option<Team>> {
        let lookup = user_id.as_str().to_owned();
        self.run_blocking(move |connection| {
            let team_name = users::table
                .filter(users::user_id.eq(&lookup))
                .select(users::team_name)
                .first::<String>(connection)
                .optional()?;
            match team_name {
                Some(raw) => {
                    let name = TeamName::new(raw).map_err(DirectoryError::persistence)?;
                    load_team(connection, &name)
                }
                None => Ok(None),
            }
        })
        .await
    }
}

#[async_trait]
impl UserDirectory for PostgresDirectory {
    async fn find_user_by_id(&self, user_id: &UserId) -> DirectoryResult<Option<User>> {
        let lookup = user_id.as_str().to_owned();
        self.run_blocking(move |connection| {
            let row = users::table
                .filter(users::user_id.eq(&lookup))
                .select(UserRow::as_select())
                .first::<UserRow>(connection)
                .optional()?;
            row.map(row_to_user).transpose()
        })
        .await
    }

    async fn set_user_active(&self, user_id: &UserId, is_active: bool) -> DirectoryResult<User> {
        let target = user_id.clone();
        self.run_blocking(move |connection| {
            let row = diesel::update(users::table.filter(users::user_id.eq(target.as_str())))
                .set(users::is_active.eq(is_active))
                .returning(UserRow::as_returning())
                .get_result::<UserRow>(connection)
                .optional()?
                .ok_or_else(|| DirectoryError::UserNotFound(target.clone()))?;
            row_to_user(row)
        })
        .await
    }
}

fn load_team(connection: &mut PgConnection, name: &TeamName) -> DirectoryResult<Option<Team>> {
    let exists = teams::table
        .filter(teams::team_name.eq(name.as_str()))
        .select(teams::team_name)
        .first::<String>(connection)
        .optional()?
        .is_some();
    if !exists {
        return Ok(None);
    }

    let rows = users::table
        .filter(users::team_name.eq(name.as_str()))
        .order(users::user_id.asc())
        .select(UserRow::as_select())
        .load::<UserRow>(connection)?;
    let members = rows
        .into_iter()
        .map(|row| {
            let id = UserId::new(row.user_id).map_err(DirectoryError::persistence)?;
            TeamMember::new(id, row.username, row.is_active).map_err(DirectoryError::persistence)
        })
        .collect::<DirectoryResult<Vec<_>>>()?;
    Ok(Some(Team::from_persisted(name.clone(), members)))
}

fn to_user_row(user: &User) -> UserRow {
    UserRow {
        user_id: user.id().as_str().to_owned(),
        username: user.name().to_owned(),
        team_name: user.team_name().as_str().to_owned(),
        is_active: user.is_active(),
    }
}

fn row_to_user(row: UserRow) -> DirectoryResult<User> {
    let UserRow {
        user_id,
        username,
        team_name,
        is_active,
    } = row;
    Ok(User::new(
        UserId::new(user_id).map_err(DirectoryError::persistence)?,
        username,
        TeamName::new(team_name).map_err(DirectoryError::persistence)?,
        is_active,
    ))
}
