//! DDL for the `text_entries` table and the manual setup runbook.

/// Table every operation targets.
pub const TABLE_NAME: &str = "text_entries";

/// Remote procedure used to run raw SQL.
pub const DEFAULT_SQL_FUNCTION: &str = "exec_sql";

/// Creates the table with server-generated `id` and `created_at`.
pub const CREATE_TABLE_SQL: &str = "\
create table if not exists public.text_entries (
  id uuid primary key default gen_random_uuid(),
  content text not null,
  created_at timestamptz not null default now(),
  ip_address text
);";

/// Enables RLS and lets the anon role insert and read rows.
pub const POLICY_SQL: &str = "\
alter table public.text_entries enable row level security;
drop policy if exists \"Allow anonymous inserts\" on public.text_entries;
create policy \"Allow anonymous inserts\" on public.text_entries
  for insert to anon with check (true);
drop policy if exists \"Allow anonymous reads\" on public.text_entries;
create policy \"Allow anonymous reads\" on public.text_entries
  for select to anon using (true);";

/// Full setup script: table, then policies.
pub fn setup_sql() -> String {
    format!("{CREATE_TABLE_SQL}\n\n{POLICY_SQL}")
}

/// Definition of the raw-SQL procedure `function`.
///
/// `security definer` lets the anon key create tables, so only install it on
/// throwaway projects.
pub fn exec_sql_function_sql(function: &str) -> String {
    format!(
        "\
create or replace function public.{function}(sql text)
returns void
language plpgsql
security definer
as $$
begin
  execute sql;
end;
$$;"
    )
}

/// Runbook printed when the table is missing and automatic creation is off or failed.
pub fn setup_instructions(function: &str) -> String {
    format!(
        "\
The '{TABLE_NAME}' table does not exist yet.

Create it from the Supabase dashboard:
  1. Open your project and go to the SQL Editor.
  2. Run the following SQL:

{setup}

  3. Run this program again.

To let this program create the table itself (--auto-create), first install
the raw SQL function:

{function_sql}
",
        setup = setup_sql(),
        function_sql = exec_sql_function_sql(function),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_setup_sql_creates_table_before_policies() {
        let sql = setup_sql();
        let create = sql.find("create table").unwrap();
        let rls = sql.find("enable row level security").unwrap();
        assert!(create < rls);
        assert!(sql.contains("for insert to anon"));
    }

    #[test]
    fn test_instructions_mention_table_and_function() {
        let text = setup_instructions("run_sql");
        assert!(text.contains("'text_entries' table does not exist"));
        assert!(text.contains("public.run_sql(sql text)"));
        assert!(text.contains(CREATE_TABLE_SQL));
    }
}
