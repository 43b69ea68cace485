use application::transfer::GetYearlyHistoryDto;

use crate::controller::Intake;

#[derive(Debug)]
pub struct YearlyHistoryRequest {
    year: i32,
}

impl YearlyHistoryRequest {
    pub fn new(year: i32) -> Self {
        Self { year }
    }
}

pub struct CollectionTransformer;

impl Intake<YearlyHistoryRequest> for CollectionTransformer {
    type To = GetYearlyHistoryDto;
    fn emit(&self, input: YearlyHistoryRequest) -> Self::To {
        GetYearlyHistoryDto { year: input.year }
    }
}
