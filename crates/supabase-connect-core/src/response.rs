use crate::error::{StatusCode, SupabaseError};

/// Response type matching Supabase's `{ data, error, count, status }` pattern.
#[derive(Debug)]
pub struct SupabaseResponse<T> {
    /// The returned data (empty Vec on error).
    pub data: Vec<T>,
    /// Error, if any.
    pub error: Option<SupabaseError>,
    /// Row count (if count was requested).
    pub count: Option<i64>,
    /// HTTP status code.
    pub status: StatusCode,
}

impl<T> SupabaseResponse<T> {
    /// Create a successful response with data.
    pub fn ok(data: Vec<T>) -> Self {
        Self {
            data,
            error: None,
            count: None,
            status: StatusCode::Ok,
        }
    }

    /// Create a created (201) response (for inserts).
    pub fn created(data: Vec<T>) -> Self {
        Self {
            data,
            error: None,
            count: None,
            status: StatusCode::Created,
        }
    }

    /// Create an error response.
    pub fn error(err: SupabaseError) -> Self {
        let status = match &err {
            SupabaseError::NoRows => StatusCode::NotFound,
            SupabaseError::PostgRest { status, .. } => StatusCode::from_u16(*status),
            _ => StatusCode::InternalError,
        };
        Self {
            data: Vec::new(),
            error: Some(err),
            count: None,
            status,
        }
    }

    /// Create a no-content (204) response.
    pub fn no_content() -> Self {
        Self {
            data: Vec::new(),
            error: None,
            count: None,
            status: StatusCode::NoContent,
        }
    }

    /// Check if the response is successful.
    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// First row, if any.
    pub fn first(&self) -> Option<&T> {
        self.data.first()
    }

    /// Convert into a Result, consuming the response.
    /// Returns the data vec on success, or the error on failure.
    pub fn into_result(self) -> Result<Vec<T>, SupabaseError> {
        match self.error {
            Some(err) => Err(err),
            None => Ok(self.data),
        }
    }

    /// Consume and return exactly one row, or error.
    pub fn into_single(self) -> Result<T, SupabaseError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        let mut data = self.data;
        match data.len() {
            0 => Err(SupabaseError::NoRows),
            1 => Ok(data.remove(0)),
            n => Err(SupabaseError::MultipleRows(n)),
        }
    }

    /// Consume and return zero or one row.
    pub fn into_maybe_single(self) -> Result<Option<T>, SupabaseError> {
        if let Some(err) = self.error {
            return Err(err);
        }
        let mut data = self.data;
        match data.len() {
            0 => Ok(None),
            1 => Ok(Some(data.remove(0))),
            n => Err(SupabaseError::MultipleRows(n)),
        }
    }

    /// Set the count.
    pub fn with_count(mut self, count: Option<i64>) -> Self {
        self.count = count;
        self
    }
}
