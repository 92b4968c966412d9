use super::prelude::*;

/// Keep only the trips that took place after the watermark.
///
/// The forms backend can only filter by submission date, so trips
/// submitted late for an already processed day are dropped here.
pub fn filter_new_trips(trips: Vec<TripRecord>, watermark: Option<TripDate>) -> Vec<TripRecord> {
    match watermark {
        Some(last) => trips.into_iter().filter(|t| t.date > last).collect(),
        None => trips,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTrips {
    /// Number of submissions returned by the forms backend.
    pub submitted: usize,
    pub trips: Vec<TripRecord>,
}

/// Fetch the trips that are not yet recorded in the spreadsheet.
pub fn fetch_new_trips<F>(forms: &F, watermark: Option<TripDate>) -> Result<NewTrips>
where
    F: SubmissionsGateway,
{
    let submitted = forms.submitted_trips(watermark)?;
    let count = submitted.len();
    let trips = filter_new_trips(submitted, watermark);
    log::debug!(
        "{} of {count} submitted trips are newer than {}",
        trips.len(),
        watermark.map(|d| d.to_string()).unwrap_or_else(|| "ever".into())
    );
    Ok(NewTrips {
        submitted: count,
        trips,
    })
}
