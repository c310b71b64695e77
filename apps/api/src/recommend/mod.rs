// Recommendation engine: TF-IDF + Naive Bayes shortlisting over job titles,
// deterministic weighted scoring, and the two-phase merge that reconciles
// them. Collaborator access stays behind the store traits — nothing in here
// touches a transport.

pub mod classifier;
pub mod handlers;
pub mod model_cache;
pub mod recommender;
pub mod scoring;
pub mod text;
