//! Relationship resolution: which classes a caller reaches.
//!
//! Teacher scope is the union of homeroom classes and classes reached through
//! teaching assignments. Student scope is anchored on the current class. Both
//! are pure functions of the graph and can be recomputed at will.

use schoolgate_config::{AcademicYearScope, ScopeConfig};
use schoolgate_models::{ClassId, ClassSubject, StudentId, TeacherId};
use std::collections::BTreeSet;

use crate::graph::RelationshipGraph;
use crate::identity::{CallerKind, IdentityContext};

/// Classes where `teacher` is class teacher or holds a teaching assignment.
pub fn resolve_teacher_scope<G: RelationshipGraph + ?Sized>(
    graph: &G,
    teacher: TeacherId,
    config: &ScopeConfig,
) -> BTreeSet<ClassId> {
    let year = &config.academic_year;

    let homerooms = graph
        .classes_led_by(teacher)
        .into_iter()
        .filter(|class| year.includes(&class.academic_year))
        .map(|class| class.id);

    let taught = graph
        .teaching_assignments(teacher)
        .into_iter()
        .filter(|assignment| year.includes(&assignment.academic_year))
        .map(|assignment| assignment.class_id);

    homerooms.chain(taught).collect()
}

/// The student's current class, `None` for orphaned or unknown students.
pub fn resolve_student_anchor<G: RelationshipGraph + ?Sized>(
    graph: &G,
    student: StudentId,
) -> Option<ClassId> {
    graph.student(student).and_then(|s| s.current_class)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TeacherScope {
    pub teacher: TeacherId,
    pub classes: BTreeSet<ClassId>,
    academic_year: AcademicYearScope,
}

impl TeacherScope {
    pub fn resolve<G: RelationshipGraph + ?Sized>(
        graph: &G,
        teacher: TeacherId,
        config: &ScopeConfig,
    ) -> Self {
        Self {
            teacher,
            classes: resolve_teacher_scope(graph, teacher, config),
            academic_year: config.academic_year.clone(),
        }
    }

    /// A missing class is never covered.
    pub fn covers_class(&self, class: Option<ClassId>) -> bool {
        class.is_some_and(|id| self.classes.contains(&id))
    }

    /// True when the assignment is this teacher's and falls in the configured years.
    pub fn owns(&self, assignment: &ClassSubject) -> bool {
        assignment.teacher_id == self.teacher
            && self.academic_year.includes(&assignment.academic_year)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StudentScope {
    pub student: StudentId,
    pub class: Option<ClassId>,
}

impl StudentScope {
    pub fn resolve<G: RelationshipGraph + ?Sized>(graph: &G, student: StudentId) -> Self {
        Self {
            student,
            class: resolve_student_anchor(graph, student),
        }
    }
}

/// Resolved scope of a non-administrator caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CallerScope {
    Teacher(TeacherScope),
    Student(StudentScope),
    /// Anonymous, administrator or unlinked callers reach nothing through relationships.
    Empty,
}

impl CallerScope {
    pub fn resolve<G: RelationshipGraph + ?Sized>(
        graph: &G,
        identity: &IdentityContext,
        config: &ScopeConfig,
    ) -> Self {
        match identity.caller_kind() {
            CallerKind::Teacher(teacher) => {
                CallerScope::Teacher(TeacherScope::resolve(graph, teacher, config))
            }
            CallerKind::Student(student) => {
                CallerScope::Student(StudentScope::resolve(graph, student))
            }
            CallerKind::Anonymous | CallerKind::Administrator | CallerKind::Unlinked => {
                CallerScope::Empty
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::SchoolDirectory;
    use schoolgate_models::{Class, NewTeachingAssignment, SchoolId, Student, SubjectId, UserId};

    fn class(teacher: Option<TeacherId>, year: &str) -> Class {
        Class {
            id: ClassId::new(),
            name: "Grade 9B".to_string(),
            level: 9,
            section: "B".to_string(),
            school_id: SchoolId::new(),
            class_teacher: teacher,
            academic_year: year.to_string(),
        }
    }

    fn assign(directory: &mut SchoolDirectory, class_id: ClassId, teacher: TeacherId, year: &str) {
        directory
            .add_teaching_assignment(NewTeachingAssignment {
                class_id,
                subject_id: SubjectId::new(),
                teacher_id: teacher,
                academic_year: year.to_string(),
                periods_per_week: 5,
            })
            .unwrap();
    }

    #[test]
    fn test_scope_is_union_of_homeroom_and_assignments() {
        let teacher = TeacherId::new();
        let mut directory = SchoolDirectory::new();
        let homeroom = class(Some(teacher), "2024-2025");
        let taught = class(None, "2024-2025");
        let other = class(None, "2024-2025");
        directory.insert_class(homeroom.clone());
        directory.insert_class(taught.clone());
        directory.insert_class(other.clone());
        assign(&mut directory, taught.id, teacher, "2024-2025");

        let scope = resolve_teacher_scope(&directory, teacher, &ScopeConfig::all_years());
        assert_eq!(scope, BTreeSet::from([homeroom.id, taught.id]));
        assert!(!scope.contains(&other.id));
    }

    #[test]
    fn test_scope_is_stable() {
        let teacher = TeacherId::new();
        let mut directory = SchoolDirectory::new();
        let taught = class(None, "2023-2024");
        directory.insert_class(taught.clone());
        assign(&mut directory, taught.id, teacher, "2023-2024");

        let config = ScopeConfig::all_years();
        assert_eq!(
            resolve_teacher_scope(&directory, teacher, &config),
            resolve_teacher_scope(&directory, teacher, &config)
        );
    }

    #[test]
    fn test_past_years_count_by_default() {
        let teacher = TeacherId::new();
        let mut directory = SchoolDirectory::new();
        let last_year = class(None, "2023-2024");
        directory.insert_class(last_year.clone());
        assign(&mut directory, last_year.id, teacher, "2023-2024");

        let all = resolve_teacher_scope(&directory, teacher, &ScopeConfig::all_years());
        assert!(all.contains(&last_year.id));

        let pinned =
            resolve_teacher_scope(&directory, teacher, &ScopeConfig::only_year("2024-2025"));
        assert!(pinned.is_empty());
    }

    #[test]
    fn test_student_anchor() {
        let mut directory = SchoolDirectory::new();
        let class_id = ClassId::new();
        let enrolled = Student {
            id: StudentId::new(),
            user_id: UserId::new(),
            student_id: "STU001".to_string(),
            admission_number: "ADM001".to_string(),
            current_class: Some(class_id),
            is_active: true,
        };
        let orphan = Student {
            id: StudentId::new(),
            current_class: None,
            ..enrolled.clone()
        };
        directory.insert_student(enrolled.clone());
        directory.insert_student(orphan.clone());

        assert_eq!(resolve_student_anchor(&directory, enrolled.id), Some(class_id));
        assert_eq!(resolve_student_anchor(&directory, orphan.id), None);
        assert_eq!(resolve_student_anchor(&directory, StudentId::new()), None);
    }

    #[test]
    fn test_covers_class_rejects_missing_anchor() {
        let scope = TeacherScope::resolve(
            &SchoolDirectory::new(),
            TeacherId::new(),
            &ScopeConfig::all_years(),
        );
        assert!(!scope.covers_class(None));
        assert!(!scope.covers_class(Some(ClassId::new())));
    }
}
